use serde::{Deserialize, Serialize};

/// Value type tags understood by the host when wiring node sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Int,
    String,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum InputSpec {
    Int {
        default: u64,
        min: u64,
        max: u64,
    },
    String {
        default: String,
        multiline: bool,
        #[serde(rename = "dynamicPrompts")]
        dynamic_prompts: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
}

impl InputSpec {
    pub fn value_type(&self) -> ValueType {
        match self {
            InputSpec::Int { .. } => ValueType::Int,
            InputSpec::String { .. } => ValueType::String,
        }
    }

    pub fn single_line(default: impl Into<String>) -> Self {
        InputSpec::String {
            default: default.into(),
            multiline: false,
            dynamic_prompts: false,
            placeholder: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedInput {
    pub name: String,
    #[serde(flatten)]
    pub spec: InputSpec,
}

/// Everything the host needs to render a node's form and wire its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSchema {
    pub required: Vec<NamedInput>,
    pub return_types: Vec<ValueType>,
    pub return_names: Vec<String>,
    pub function: String,
    pub category: String,
}

impl NodeSchema {
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.required
            .iter()
            .find(|input| input.name == name)
            .map(|input| &input.spec)
    }
}
