use portfolio_core::ProductId;

/// A command targets the charge definitions of one product (command abstraction).
///
/// Commands represent **intent** - a request to change state. Handing one to a
/// gateway means "please apply this", not "this happened".
///
/// ## Product Targeting
///
/// Commands must name the product they act on via `target_product()`. This enables:
/// - **Routing**: substrates can partition queues per product
/// - **Ordering**: commands for one product can be applied serially, which is where
///   duplicate creates racing past validation get resolved
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Cloneable**: commands may be copied for retries, logging, etc.
/// - **Send + Sync**: commands cross thread boundaries (queue, worker)
/// - **'static**: commands own all their data
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable command name (e.g. "charges.definition.create").
    fn command_type(&self) -> &'static str;

    /// Product whose charge definitions this command changes.
    fn target_product(&self) -> &ProductId;
}
