//! GraphQL documents for the Projects (v2) API.

use estimate::OwnerKind;

/// Page size for the item listing. Also the number of fields scanned during
/// resolution; fields beyond the first page are not visible.
pub const PAGE_SIZE: u32 = 100;

/// Number of field values read per item.
pub const FIELD_VALUES_PER_ITEM: u32 = 50;

/// Resolves a project and its fields by owner login and project number.
///
/// Variables: `owner: String!`, `number: Int!`.
pub fn resolve_project(owner_kind: OwnerKind) -> String {
    format!(
        r#"query($owner: String!, $number: Int!) {{
  owner: {kind}(login: $owner) {{
    projectV2(number: $number) {{
      id
      fields(first: {PAGE_SIZE}) {{
        nodes {{
          ... on ProjectV2FieldCommon {{ id name }}
        }}
      }}
    }}
  }}
}}"#,
        kind = owner_kind.as_str(),
    )
}

/// Lists one page of project items with their title and field values.
///
/// Variables: `projectId: ID!`, `cursor: String` (null for the first page).
pub fn list_items() -> String {
    format!(
        r#"query($projectId: ID!, $cursor: String) {{
  node(id: $projectId) {{
    ... on ProjectV2 {{
      items(first: {PAGE_SIZE}, after: $cursor) {{
        pageInfo {{ hasNextPage endCursor }}
        nodes {{
          id
          content {{
            ... on DraftIssue {{ title }}
            ... on Issue {{ title }}
            ... on PullRequest {{ title }}
          }}
          fieldValues(first: {FIELD_VALUES_PER_ITEM}) {{
            nodes {{
              ... on ProjectV2ItemFieldSingleSelectValue {{
                name
                field {{ ... on ProjectV2FieldCommon {{ name }} }}
              }}
              ... on ProjectV2ItemFieldNumberValue {{
                number
                field {{ ... on ProjectV2FieldCommon {{ name }} }}
              }}
            }}
          }}
        }}
      }}
    }}
  }}
}}"#
    )
}

/// Sets a numeric field value on one item.
///
/// Variables: `projectId: ID!`, `itemId: ID!`, `fieldId: ID!`, `value: Float!`.
pub const UPDATE_NUMBER_FIELD: &str = r#"mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: Float!) {
  updateProjectV2ItemFieldValue(input: {
    projectId: $projectId
    itemId: $itemId
    fieldId: $fieldId
    value: { number: $value }
  }) {
    projectV2Item { id }
  }
}"#;
