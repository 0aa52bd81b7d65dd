use serde::{Deserialize, Serialize};

/// Query parameters of the survey attributes endpoint.
/// Serialized as `order=<asc|desc>&orderby=<field>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeQuery {
    pub order: SortOrder,
    pub orderby: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl AttributeQuery {
    /// Attributes in ascending `priority`, the order the survey defines them in.
    pub fn by_priority() -> Self {
        Self {
            order: SortOrder::Asc,
            orderby: "priority".to_string(),
        }
    }

    pub fn to_query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("order", self.order.as_str().to_string()),
            ("orderby", self.orderby.clone()),
        ]
    }
}

impl Default for AttributeQuery {
    fn default() -> Self {
        Self::by_priority()
    }
}
