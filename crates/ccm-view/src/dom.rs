//! Document collaborator
//!
//! The host environment owns the live document. The trait exposes only what
//! reconciliation needs: tagged-node lookup, attribute and inner-markup
//! access, and script-element handling. Markup set through
//! `set_inner_html` is inert; embedded scripts do not run until they are
//! re-created through `append_script`.

/// Attribute tagging an element with the service it is gated behind.
pub const CONSENT_ATTR: &str = "data-cookie-consent";

/// Handle to one consent-gated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Handle to one inline script child of a node, by position among the
/// node's script children in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRef {
    pub node: NodeId,
    pub index: usize,
}

pub trait ConsentDom {
    /// All nodes whose [`CONSENT_ATTR`] equals the given service, in
    /// document order.
    fn select_gated(&self, service: &str) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn inner_html(&self, node: NodeId) -> String;

    /// Replace the node's rendered content. Scripts inside the new markup
    /// are inserted inert and do not execute.
    fn set_inner_html(&mut self, node: NodeId, html: &str);

    /// The node's inline script children, in document order.
    fn scripts(&self, node: NodeId) -> Vec<ScriptRef>;

    fn script_text(&self, script: ScriptRef) -> Option<String>;

    fn remove_script(&mut self, script: ScriptRef);

    /// Create a fresh executable script element with the given source and
    /// append it to the node. This is the only way a script runs.
    fn append_script(&mut self, node: NodeId, source: &str);
}
