/// Node type whose values come from the traversal's external input boundary
pub const INPUT_NODE_TYPE: &str = "input";
/// Node type whose values are delivered to the traversal's external output boundary
pub const OUTPUT_NODE_TYPE: &str = "output";
/// Node type tag the include handler is registered under
pub const INCLUDE_NODE_TYPE: &str = "include";
/// Input key naming the nested graph document for include nodes
pub const INCLUDE_PATH_KEY: &str = "path";
/// Edge key that forwards every output of the source node
pub const WILDCARD_KEY: &str = "*";
/// Default maximum nesting depth for included graphs
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;
/// Default tracing filter used by the binary when neither config nor RUST_LOG set one
pub const DEFAULT_LOG_FILTER: &str = "info";
