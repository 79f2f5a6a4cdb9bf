//! Calculator tool for safe math expression evaluation.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ToolError;
use crate::input::{MathExpression, CALCULATOR};
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Calculator tool that safely evaluates mathematical expressions.
///
/// Uses the `meval` crate, which only understands arithmetic and a fixed
/// set of functions and constants.
///
/// # Parameters
///
/// - `expression` (required): The mathematical expression to evaluate.
///
/// # Examples
///
/// ```json
/// {"expression": "0.25 * (300 + 75)"}
/// {"expression": "1 - 0.2"}
/// ```
pub struct Calculator;

impl Calculator {
    /// Create a new calculator tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a result: integer-like values without decimals.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        CALCULATOR
    }

    fn description(&self) -> &str {
        "Useful for when you need to answer questions about math, such as equity, \
         expected value, or bet sizing arithmetic. Input is a single mathematical expression \
         using +, -, *, /, ^, parentheses, functions (sqrt, abs, ln, log, sin, cos) \
         and constants (pi, e)."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The expression to evaluate, e.g. \"0.25 * (300 + 75)\""
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let MathExpression { expression } = args.decode()?;

        debug!("Evaluating expression: {}", expression);

        match meval::eval_str(&expression) {
            Ok(result) if result.is_finite() => {
                let formatted = format_number(result);
                debug!("Result: {}", formatted);
                Ok(ToolOutput::success(format!("{} = {}", expression, formatted)))
            }
            Ok(result) => Err(ToolError::EvalError(format!(
                "'{}' does not have a finite value ({})",
                expression, result
            ))),
            Err(e) => {
                debug!("Evaluation error: {}", e);
                Err(ToolError::EvalError(format!(
                    "Failed to evaluate '{}': {}",
                    expression, e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_args(expr: &str) -> ToolArgs {
        let mut params = HashMap::new();
        params.insert("expression".to_string(), Value::String(expr.to_string()));
        ToolArgs::new(params)
    }

    #[tokio::test]
    async fn test_basic_arithmetic() {
        let calc = Calculator::new();

        let result = calc.execute(make_args("2 + 2")).await.unwrap();
        assert!(result.success);
        assert_eq!(result.content, "2 + 2 = 4");

        let result = calc.execute(make_args("15 / 3")).await.unwrap();
        assert_eq!(result.content, "15 / 3 = 5");
    }

    #[tokio::test]
    async fn test_order_of_operations() {
        let calc = Calculator::new();

        let result = calc.execute(make_args("2 + 3 * 4")).await.unwrap();
        assert!(result.content.ends_with("= 14"));

        let result = calc.execute(make_args("(2 + 3) * 4")).await.unwrap();
        assert!(result.content.ends_with("= 20"));
    }

    #[tokio::test]
    async fn test_fractional_result() {
        let result = Calculator::new()
            .execute(make_args("50 / (50 + 200)"))
            .await
            .unwrap();
        assert_eq!(result.content, "50 / (50 + 200) = 0.2");
    }

    #[tokio::test]
    async fn test_functions_and_constants() {
        let calc = Calculator::new();

        let result = calc.execute(make_args("sqrt(16)")).await.unwrap();
        assert!(result.content.ends_with("= 4"));

        let result = calc.execute(make_args("pi")).await.unwrap();
        assert!(result.content.contains("3.14"));
    }

    #[tokio::test]
    async fn test_invalid_expression() {
        let calc = Calculator::new();

        let result = calc.execute(make_args("2 +")).await;
        assert!(matches!(result, Err(ToolError::EvalError(_))));

        let result = calc.execute(make_args("undefined_var")).await;
        assert!(matches!(result, Err(ToolError::EvalError(_))));
    }

    #[tokio::test]
    async fn test_division_by_zero() {
        let result = Calculator::new().execute(make_args("1 / 0")).await;
        assert!(matches!(result, Err(ToolError::EvalError(_))));
    }

    #[tokio::test]
    async fn test_missing_expression() {
        let result = Calculator::new().execute(ToolArgs::new(HashMap::new())).await;
        assert!(matches!(result, Err(ToolError::MalformedInput(_))));
    }
}
