use serde::{Deserialize, Serialize};

/// Which kind of follow-up question a clarification asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarificationKind {
    /// The query needs a market (DAM/RTM/both) to proceed
    ProductSelection,
    /// The query names a market but no time period
    TimeSelection,
    /// The query is too vague to pick one of the supported intents
    QueryTypeSelection,
    /// The query asks for a comparison, which needs reformulating
    ComparisonHelp,
}

/// One selectable answer to a clarification question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationOption {
    /// Human-readable description shown to the user
    pub label: String,
    /// Machine-usable value to substitute into the follow-up template
    pub value: String,
}

impl ClarificationOption {
    /// Build an option from a label/value pair.
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// A structured follow-up question for an underspecified query.
///
/// Created fresh per ambiguous query and returned directly to the caller;
/// the system keeps no session state between the question and whatever
/// the user asks next. Depending on the kind, the payload carries either
/// selectable `options` or free-text `suggestions`, plus a template
/// showing how a complete follow-up query should be composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationRequest {
    /// The kind of follow-up being asked
    pub kind: ClarificationKind,
    /// Selectable label/value pairs, when the answer is an enumeration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ClarificationOption>,
    /// Free-text reformulation suggestions, when there is no enumeration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// How a follow-up answer should be composed, e.g.
    /// `"average price for {product} {time_period}"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_template: Option<String>,
}
