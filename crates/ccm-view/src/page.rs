//! In-memory reference document
//!
//! Stands in for a live page in tests and non-browser hosts. Nodes keep
//! their inner markup as raw strings; script elements are located by tag
//! scanning. Executed script sources are recorded in order so callers can
//! assert exactly-once activation.

use std::collections::HashMap;
use std::ops::Range;

use crate::dom::{ConsentDom, NodeId, ScriptRef, CONSENT_ATTR};

struct Node {
    attributes: HashMap<String, String>,
    html: String,
}

#[derive(Default)]
pub struct PageDom {
    nodes: Vec<Node>,
    executed: Vec<String>,
}

impl PageDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consent-gated node with its initial rendered markup.
    /// Scripts already present count as executed by normal page load.
    pub fn insert_node(&mut self, service: &str, html: &str) -> NodeId {
        let mut attributes = HashMap::new();
        attributes.insert(CONSENT_ATTR.to_string(), service.to_string());

        self.nodes.push(Node {
            attributes,
            html: html.to_string(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Every script source activated so far, in execution order.
    pub fn executed_scripts(&self) -> &[String] {
        &self.executed
    }
}

struct ScriptSpan {
    element: Range<usize>,
    source: Range<usize>,
}

fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    haystack.get(start..)?.find(needle).map(|i| start + i)
}

/// Locate every `<script>...</script>` element, in document order.
fn script_spans(html: &str) -> Vec<ScriptSpan> {
    let lower = html.to_ascii_lowercase();
    let mut spans = Vec::new();
    let mut pos = 0usize;

    while let Some(open) = find_from(&lower, "<script", pos) {
        // Reject tags that merely start with "script"
        let after = lower.as_bytes().get(open + 7).copied();
        if !matches!(after, Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            pos = open + 7;
            continue;
        }

        let open_gt = match find_from(&lower, ">", open) {
            Some(i) => i,
            None => break,
        };
        let close = match find_from(&lower, "</script", open_gt + 1) {
            Some(i) => i,
            None => break,
        };
        let close_gt = match find_from(&lower, ">", close) {
            Some(i) => i,
            None => break,
        };

        spans.push(ScriptSpan {
            element: open..close_gt + 1,
            source: open_gt + 1..close,
        });
        pos = close_gt + 1;
    }

    spans
}

impl ConsentDom for PageDom {
    fn select_gated(&self, service: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attributes.get(CONSENT_ATTR).map(String::as_str) == Some(service))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.get(node.0)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.nodes
            .get(node.0)
            .map(|node| node.html.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) {
        if let Some(node) = self.nodes.get_mut(node.0) {
            node.html = html.to_string();
        }
    }

    fn scripts(&self, node: NodeId) -> Vec<ScriptRef> {
        let Some(n) = self.nodes.get(node.0) else {
            return Vec::new();
        };

        (0..script_spans(&n.html).len())
            .map(|index| ScriptRef { node, index })
            .collect()
    }

    fn script_text(&self, script: ScriptRef) -> Option<String> {
        let node = self.nodes.get(script.node.0)?;
        let span = script_spans(&node.html).into_iter().nth(script.index)?;
        Some(node.html[span.source].to_string())
    }

    fn remove_script(&mut self, script: ScriptRef) {
        let Some(node) = self.nodes.get_mut(script.node.0) else {
            return;
        };

        if let Some(span) = script_spans(&node.html).into_iter().nth(script.index) {
            node.html.replace_range(span.element, "");
        }
    }

    fn append_script(&mut self, node: NodeId, source: &str) {
        let Some(n) = self.nodes.get_mut(node.0) else {
            return;
        };

        n.html.push_str("<script>");
        n.html.push_str(source);
        n.html.push_str("</script>");
        self.executed.push(source.to_string());
    }
}
