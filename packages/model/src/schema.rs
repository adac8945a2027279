/// Structural validation seam exposed to converters.
///
/// The conversion dispatcher forwards a schema to every callback without
/// interpreting it; converters ask whether a candidate child is allowed under
/// the current ancestor context and decline to act when it is not. Rejection
/// is an ordinary "not applicable" outcome, never an error.
pub trait Schema {
    /// May an element or text node called `child_name` appear under the given
    /// ancestor context (outermost first)?
    fn check_child(&self, context: &[String], child_name: &str) -> bool;
}

/// Schema that accepts everything. The default for dispatchers constructed
/// without an injected schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveSchema;

impl Schema for PermissiveSchema {
    fn check_child(&self, _context: &[String], _child_name: &str) -> bool {
        true
    }
}
