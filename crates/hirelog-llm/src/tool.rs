//! Tool-call request and response types shared by every provider

use serde::Serialize;
use serde_json::{json, Value};

/// A function the model is forced to call
///
/// `parameters` is a JSON Schema object describing the arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSchema {
    /// Function name, e.g. `extract_application_details`
    pub name: String,

    /// What the function is for, shown to the model
    pub description: String,

    /// JSON Schema of the arguments
    pub parameters: Value,
}

impl ToolSchema {
    /// Create a tool schema
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Render as an OpenAI-style function tool
    pub fn to_function_tool(&self) -> Value {
        json!({
            "type": "function",
            "function": self,
        })
    }

    /// Render the `tool_choice` value that forces this tool
    pub fn to_tool_choice(&self) -> Value {
        json!({
            "type": "function",
            "function": { "name": self.name },
        })
    }
}

/// One extraction request: instructions, the text to analyse, and the tool
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// System instruction
    pub system: String,

    /// User content (the text being analysed)
    pub user: String,

    /// Tool the model must call
    pub tool: ToolSchema,
}

impl ToolRequest {
    /// Create a request
    pub fn new(system: impl Into<String>, user: impl Into<String>, tool: ToolSchema) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            tool,
        }
    }
}

/// A single function call made by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Name of the function called
    pub name: String,

    /// Arguments as a JSON-encoded string
    pub arguments: String,
}

/// Provider reply
#[derive(Debug, Clone, Default)]
pub struct ToolResponse {
    /// Tool calls in the order the model produced them
    pub tool_calls: Vec<ToolCall>,

    /// Raw response body
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_tool_shape() {
        let tool = ToolSchema::new(
            "extract_company",
            "Extract the company name",
            json!({
                "type": "object",
                "properties": { "company_name": { "type": "string" } },
                "required": ["company_name"],
            }),
        );

        let rendered = tool.to_function_tool();
        assert_eq!(rendered["type"], "function");
        assert_eq!(rendered["function"]["name"], "extract_company");
        assert_eq!(rendered["function"]["description"], "Extract the company name");
        assert_eq!(rendered["function"]["parameters"]["required"][0], "company_name");

        let choice = tool.to_tool_choice();
        assert_eq!(choice["function"]["name"], "extract_company");
    }
}
