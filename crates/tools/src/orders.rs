//! Order workflow tools over an in-memory order book.
//!
//! Steps that cannot be carried out (cancelling an order that has already
//! shipped, printing a cancelled order, an unknown order number) are
//! reported as failed [`ToolResult`]s, never as errors, so the model can
//! explain them and log the reason.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ragent_core::error::ToolError;
use ragent_core::tool::{Tool, ToolResult};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    UnderReview,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shipment {
    NotShipped,
    PartiallyShipped,
    Shipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub items: Vec<String>,
    pub total_usd: f64,
    pub status: OrderStatus,
    pub shipment: Shipment,
    pub printed: bool,
}

/// A reason recorded through `LogReasonWhyStepCannotBePerformed`.
#[derive(Debug, Clone, Serialize)]
pub struct LoggedReason {
    pub reason: String,
    pub logged_at: DateTime<Utc>,
}

/// Orders keyed by id, plus the log of steps that could not be performed.
#[derive(Default)]
pub struct OrderBook {
    orders: RwLock<HashMap<String, Order>>,
    reasons: RwLock<Vec<LoggedReason>>,
}

impl OrderBook {
    pub fn new(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: RwLock::new(orders.into_iter().map(|o| (o.id.clone(), o)).collect()),
            reasons: RwLock::new(Vec::new()),
        }
    }

    /// Two demo orders: `XYZ123` (open, not shipped) and `ABC00987`
    /// (open, partially shipped).
    pub fn sample() -> Self {
        Self::new([
            Order {
                id: "XYZ123".into(),
                customer: "Carlos Estefano Garcia".into(),
                items: vec!["Standing desk".into(), "Monitor arm".into()],
                total_usd: 689.90,
                status: OrderStatus::Open,
                shipment: Shipment::NotShipped,
                printed: false,
            },
            Order {
                id: "ABC00987".into(),
                customer: "Carlos Estefano Garcia".into(),
                items: vec!["Office chair".into(), "Desk lamp".into(), "Keyboard".into()],
                total_usd: 412.50,
                status: OrderStatus::Open,
                shipment: Shipment::PartiallyShipped,
                printed: false,
            },
        ])
    }

    pub async fn get(&self, id: &str) -> Option<Order> {
        self.orders.read().await.get(id).cloned()
    }

    pub async fn reasons(&self) -> Vec<LoggedReason> {
        self.reasons.read().await.clone()
    }

    async fn log_reason(&self, reason: &str) {
        self.reasons.write().await.push(LoggedReason {
            reason: reason.to_string(),
            logged_at: Utc::now(),
        });
    }
}

fn order_id_schema(action: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "orderId": {
                "type": "string",
                "description": format!("The order number to {action}, e.g. XYZ123")
            }
        },
        "required": ["orderId"]
    })
}

fn required_str(tool: &str, arguments: &serde_json::Value, field: &str) -> Result<String, ToolError> {
    arguments[field]
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::InvalidArguments {
            tool_name: tool.into(),
            reason: format!("missing '{field}' argument"),
        })
}

fn not_found(id: &str) -> ToolResult {
    ToolResult::failure(format!("Order {id} was not found"))
}

pub struct GetOrderInformationTool {
    book: Arc<OrderBook>,
}

impl GetOrderInformationTool {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for GetOrderInformationTool {
    fn name(&self) -> &str {
        "GetOrderInformation"
    }

    fn description(&self) -> &str {
        "Get the current information of an order: status, shipment state, items and total"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        order_id_schema("look up")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let id = required_str(self.name(), &arguments, "orderId")?;
        let Some(order) = self.book.get(&id).await else {
            return Ok(not_found(&id));
        };

        let data = serde_json::to_value(&order).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })?;

        Ok(ToolResult {
            success: true,
            output: data.to_string(),
            data: Some(data),
        })
    }
}

pub struct SendOrderToBeReviewedByManagerTool {
    book: Arc<OrderBook>,
}

impl SendOrderToBeReviewedByManagerTool {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for SendOrderToBeReviewedByManagerTool {
    fn name(&self) -> &str {
        "SendOrderToBeReviewedByManager"
    }

    fn description(&self) -> &str {
        "Send an order to the user's manager for review"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        order_id_schema("send for review")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let id = required_str(self.name(), &arguments, "orderId")?;
        let mut orders = self.book.orders.write().await;
        let Some(order) = orders.get_mut(&id) else {
            return Ok(not_found(&id));
        };

        if order.status == OrderStatus::Cancelled {
            return Ok(ToolResult::failure(format!(
                "Order {id} is cancelled and cannot be sent for review"
            )));
        }

        order.status = OrderStatus::UnderReview;
        info!(order = %id, "Order sent to manager for review");
        Ok(ToolResult::text(format!("Order {id} was sent to the manager for review")))
    }
}

pub struct PrintOrderTool {
    book: Arc<OrderBook>,
}

impl PrintOrderTool {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for PrintOrderTool {
    fn name(&self) -> &str {
        "PrintOrder"
    }

    fn description(&self) -> &str {
        "Send an order to the printer"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        order_id_schema("print")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let id = required_str(self.name(), &arguments, "orderId")?;
        let mut orders = self.book.orders.write().await;
        let Some(order) = orders.get_mut(&id) else {
            return Ok(not_found(&id));
        };

        if order.status == OrderStatus::Cancelled {
            return Ok(ToolResult::failure(format!(
                "Order {id} is cancelled and cannot be printed"
            )));
        }

        order.printed = true;
        info!(order = %id, "Order printed");
        Ok(ToolResult::text(format!("Order {id} was sent to the printer")))
    }
}

pub struct CancelOrderTool {
    book: Arc<OrderBook>,
}

impl CancelOrderTool {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for CancelOrderTool {
    fn name(&self) -> &str {
        "CancelOrder"
    }

    fn description(&self) -> &str {
        "Cancel an order. Orders that have shipped, even partially, cannot be cancelled"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        order_id_schema("cancel")
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let id = required_str(self.name(), &arguments, "orderId")?;
        let mut orders = self.book.orders.write().await;
        let Some(order) = orders.get_mut(&id) else {
            return Ok(not_found(&id));
        };

        let refusal = match (order.status, order.shipment) {
            (OrderStatus::Cancelled, _) => Some("it is already cancelled"),
            (_, Shipment::PartiallyShipped) => Some("it has been partially shipped"),
            (_, Shipment::Shipped) => Some("it has already been shipped"),
            _ => None,
        };

        if let Some(why) = refusal {
            info!(order = %id, reason = why, "Order cannot be cancelled");
            return Ok(ToolResult::failure(format!(
                "Order {id} cannot be cancelled because {why}"
            )));
        }

        order.status = OrderStatus::Cancelled;
        info!(order = %id, "Order cancelled");
        Ok(ToolResult::text(format!("Order {id} was cancelled")))
    }
}

pub struct LogReasonTool {
    book: Arc<OrderBook>,
}

impl LogReasonTool {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Tool for LogReasonTool {
    fn name(&self) -> &str {
        "LogReasonWhyStepCannotBePerformed"
    }

    fn description(&self) -> &str {
        "Log the technical reason why a requested step cannot be performed, including the order number and the tool that failed"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "reason": {
                    "type": "string",
                    "description": "What could not be done and why"
                }
            },
            "required": ["reason"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let reason = required_str(self.name(), &arguments, "reason")?;
        warn!(reason = %reason, "Workflow step cannot be performed");
        self.book.log_reason(&reason).await;
        Ok(ToolResult::text("The reason was logged"))
    }
}

/// Every order workflow tool, sharing one order book, in registration order.
pub fn order_tools(book: Arc<OrderBook>) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(GetOrderInformationTool::new(Arc::clone(&book))),
        Box::new(SendOrderToBeReviewedByManagerTool::new(Arc::clone(&book))),
        Box::new(PrintOrderTool::new(Arc::clone(&book))),
        Box::new(LogReasonTool::new(Arc::clone(&book))),
        Box::new(CancelOrderTool::new(book)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn book() -> Arc<OrderBook> {
        Arc::new(OrderBook::sample())
    }

    #[tokio::test]
    async fn order_information_is_json() {
        let tool = GetOrderInformationTool::new(book());
        let result = tool.execute(json!({ "orderId": "XYZ123" })).await.unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["status"], "open");
        assert_eq!(data["shipment"], "not_shipped");
    }

    #[tokio::test]
    async fn unknown_order_is_a_business_failure() {
        let tool = PrintOrderTool::new(book());
        let result = tool.execute(json!({ "orderId": "NOPE" })).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("NOPE was not found"));
    }

    #[tokio::test]
    async fn missing_order_id_is_invalid_arguments() {
        let tool = CancelOrderTool::new(book());
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool_name, .. } if tool_name == "CancelOrder"));
    }

    #[tokio::test]
    async fn review_then_print() {
        let book = book();
        SendOrderToBeReviewedByManagerTool::new(book.clone())
            .execute(json!({ "orderId": "XYZ123" }))
            .await
            .unwrap();
        let printed = PrintOrderTool::new(book.clone())
            .execute(json!({ "orderId": "XYZ123" }))
            .await
            .unwrap();
        assert!(printed.success);

        let order = book.get("XYZ123").await.unwrap();
        assert_eq!(order.status, OrderStatus::UnderReview);
        assert!(order.printed);
    }

    #[tokio::test]
    async fn partially_shipped_order_cannot_be_cancelled() {
        let book = book();
        let result = CancelOrderTool::new(book.clone())
            .execute(json!({ "orderId": "ABC00987" }))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.output.contains("partially shipped"));
        assert_eq!(book.get("ABC00987").await.unwrap().status, OrderStatus::Open);
    }

    #[tokio::test]
    async fn cancelled_order_cannot_be_printed() {
        let book = book();
        let cancelled = CancelOrderTool::new(book.clone())
            .execute(json!({ "orderId": "XYZ123" }))
            .await
            .unwrap();
        assert!(cancelled.success);

        let printed = PrintOrderTool::new(book.clone())
            .execute(json!({ "orderId": "XYZ123" }))
            .await
            .unwrap();
        assert!(!printed.success);
        assert!(!book.get("XYZ123").await.unwrap().printed);
    }

    #[tokio::test]
    async fn reasons_are_recorded() {
        let book = book();
        LogReasonTool::new(book.clone())
            .execute(json!({ "reason": "CancelOrder failed for ABC00987: partially shipped" }))
            .await
            .unwrap();
        let reasons = book.reasons().await;
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].reason.contains("ABC00987"));
    }

    #[test]
    fn order_tools_names() {
        let names: Vec<String> = order_tools(book())
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "GetOrderInformation",
                "SendOrderToBeReviewedByManager",
                "PrintOrder",
                "LogReasonWhyStepCannotBePerformed",
                "CancelOrder",
            ]
        );
    }
}
