//! The three tools exposed to the shop assistant
//!
//! Unknown product names come back as error tool results so the model can
//! ask the customer to clarify; they never abort the turn.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use tracing::{info, warn};

use shopbot_core::tool::SchemaBuilder;
use shopbot_core::{Result, Tool, ToolManager, ToolResult};

use crate::catalog::{total_price, Order, OrderItem, Product};

/// Register the shop tool set on a manager
pub fn register_shop_tools(manager: &mut ToolManager) {
    manager.register(Arc::new(ProcessOrderTool));
    manager.register(Arc::new(TotalPriceTool));
    manager.register(Arc::new(PaymentStatusTool));
}

/// JSON schema shared by the two order-taking tools
fn order_schema() -> JsonValue {
    let product_names: Vec<&str> = Product::ALL.iter().map(|p| p.display_name()).collect();

    json!({
        "type": "object",
        "properties": {
            "order": {
                "type": "array",
                "description": "The order line items",
                "items": {
                    "type": "object",
                    "properties": {
                        "product": SchemaBuilder::string_enum(product_names),
                        "quantity": {"type": "integer", "description": "Units ordered"}
                    },
                    "required": ["product", "quantity"]
                }
            }
        },
        "required": ["order"]
    })
}

/// Parse and validate the `order` argument. Returns a message suitable to
/// hand back to the model on any validation failure.
fn parse_order(input: &JsonValue) -> std::result::Result<Order, String> {
    let items = input
        .get("order")
        .and_then(|o| o.as_array())
        .ok_or_else(|| "Expected an 'order' array of {product, quantity} items".to_string())?;

    let mut order = Order::with_capacity(items.len());
    for item in items {
        let name = item
            .get("product")
            .and_then(|p| p.as_str())
            .ok_or_else(|| "Each order item needs a 'product' string".to_string())?;

        let product = Product::from_str(name).map_err(|e| {
            let catalog: Vec<&str> = Product::ALL.iter().map(|p| p.display_name()).collect();
            format!("{}. We only sell: {}", e, catalog.join(", "))
        })?;

        let quantity = item
            .get("quantity")
            .and_then(|q| q.as_u64())
            .ok_or_else(|| format!("Invalid quantity for '{}'", product))?;

        order.push(OrderItem {
            product,
            quantity: quantity as u32,
        });
    }

    Ok(order)
}

/// Records the order line items
pub struct ProcessOrderTool;

#[async_trait]
impl Tool for ProcessOrderTool {
    fn name(&self) -> &str {
        "process_order"
    }

    fn description(&self) -> &str {
        "Process a customer order given as a list of product/quantity line items."
    }

    fn input_schema(&self) -> JsonValue {
        order_schema()
    }

    async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
        let order = match parse_order(&input) {
            Ok(order) => order,
            Err(message) => {
                warn!("Rejected order: {}", message);
                return Ok(ToolResult::error(message));
            }
        };

        info!("Processing order with {} line items", order.len());
        for item in &order {
            info!("Processing {} units of {}", item.quantity, item.product);
        }

        Ok(ToolResult::success("Order recorded"))
    }
}

/// Computes the flat-rate order total
pub struct TotalPriceTool;

#[async_trait]
impl Tool for TotalPriceTool {
    fn name(&self) -> &str {
        "get_total_price"
    }

    fn description(&self) -> &str {
        "Get the total price of an order."
    }

    fn input_schema(&self) -> JsonValue {
        order_schema()
    }

    async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
        match parse_order(&input) {
            Ok(order) => Ok(ToolResult::success(total_price(&order).to_string())),
            Err(message) => {
                warn!("Rejected order: {}", message);
                Ok(ToolResult::error(message))
            }
        }
    }
}

/// Looks up the payment status for a payment id.
///
/// Placeholder semantics: even ids are paid, odd ids are not. There is no
/// settlement lookup behind this yet.
pub struct PaymentStatusTool;

#[async_trait]
impl Tool for PaymentStatusTool {
    fn name(&self) -> &str {
        "get_payment_status"
    }

    fn description(&self) -> &str {
        "Get the status of a payment by its id."
    }

    fn input_schema(&self) -> JsonValue {
        SchemaBuilder::object_schema(vec![("id", "integer", "The id of the payment", true)])
    }

    async fn execute(&self, input: JsonValue) -> Result<ToolResult> {
        let Some(id) = input.get("id").and_then(|v| v.as_i64()) else {
            return Ok(ToolResult::error("Expected an integer 'id'"));
        };

        let status = if id % 2 == 0 { "paid" } else { "not paid" };
        Ok(ToolResult::success(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_process_order_accepts_catalog_products() {
        let result = ProcessOrderTool
            .execute(json!({"order": [{"product": "Greek yoghurt", "quantity": 2}]}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.output, "Order recorded");
    }

    #[tokio::test]
    async fn test_process_order_rejects_unknown_product() {
        let result = ProcessOrderTool
            .execute(json!({"order": [{"product": "Gouda", "quantity": 1}]}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.output.contains("Unknown product: 'Gouda'"));
        assert!(result.output.contains("Greek yoghurt"));
    }

    #[tokio::test]
    async fn test_process_order_rejects_missing_order() {
        let result = ProcessOrderTool.execute(json!({})).await.unwrap();
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_total_price_for_two_greek_yoghurts() {
        let result = TotalPriceTool
            .execute(json!({"order": [{"product": "Greek yoghurt", "quantity": 2}]}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.output, "2000");
    }

    #[tokio::test]
    async fn test_total_price_sums_line_items() {
        let result = TotalPriceTool
            .execute(json!({"order": [
                {"product": "Labneh", "quantity": 2},
                {"product": "Mango yoghurt", "quantity": 3}
            ]}))
            .await
            .unwrap();
        assert_eq!(result.output, "5000");
    }

    #[tokio::test]
    async fn test_payment_status_parity() {
        for (id, expected) in [(0, "paid"), (2, "paid"), (7, "not paid"), (-3, "not paid")] {
            let result = PaymentStatusTool
                .execute(json!({"id": id}))
                .await
                .unwrap();
            assert!(!result.is_error);
            assert_eq!(result.output, expected, "id {}", id);
        }
    }

    #[tokio::test]
    async fn test_payment_status_requires_integer_id() {
        let result = PaymentStatusTool
            .execute(json!({"id": "four"}))
            .await
            .unwrap();
        assert!(result.is_error);
    }

    #[test]
    fn test_register_shop_tools() {
        let mut manager = ToolManager::new();
        register_shop_tools(&mut manager);
        assert_eq!(manager.len(), 3);
        let mut names = manager.tool_names();
        names.sort();
        assert_eq!(
            names,
            vec!["get_payment_status", "get_total_price", "process_order"]
        );
    }

    #[test]
    fn test_order_schema_lists_every_product() {
        let schema = order_schema();
        let enum_values = schema["properties"]["order"]["items"]["properties"]["product"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(enum_values.len(), Product::ALL.len());
    }
}
