//! Instruction text telling the LLM how to request tools

use crate::registry::ToolRegistry;
use agent_core::Result;
use rand::Rng;

/// Fixed explanation of the request format, with a worked example
pub const INSTRUCTION_PREAMBLE: &str = r#"When one of these tools is applicable, you must express your request in
JSON format. The fields will be based on the tool description, which will be of
the form:

<tool_name>: description involving <arg1> maybe some other <arg2> and so on.

The JSON format will be:
{
    "request": "<tool_name>",
    "<arg1>": <value1>,
    "<arg2>": <value2>
}
where it is important to note that <arg1> is the NAME of the argument,
and <value1> is the VALUE of the argument.

For example if a tool with this description is available:

country_capital: check if <city> is the capital of <country>,

and you want to check whether the capital of France is Paris, you must ask
in the following JSON format:
{
    "request": "country_capital",
    "country": "France",
    "city": "Paris"
}

But if you want to find out the population of France, you must ask in natural
language: "What is the population of France?"

Whenever possible, AND ONLY IF APPLICABLE, use these tools, with the JSON syntax
specified above. When a tool is applicable, simply use this syntax, do not write
anything else. Only if no tool is exactly applicable, ask in natural language."#;

impl<A> ToolRegistry<A> {
    /// Instructions covering every registered tool
    ///
    /// The preamble is followed by one block per tool, in registration
    /// order: its description line and one usage example drawn from `rng`.
    /// An empty registry yields an empty string.
    pub fn instructions<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        if self.is_empty() {
            return Ok(String::new());
        }

        let mut text = String::from(INSTRUCTION_PREAMBLE);
        text.push_str("\n\nThe available tools are:\n");
        for schema in self.schemas() {
            let example = self.usage_example(&schema.request, rng)?;
            text.push_str(&format!(
                "\n{}\nExample:\n{}\n",
                schema.description_line(),
                example
            ));
        }
        Ok(text)
    }
}
