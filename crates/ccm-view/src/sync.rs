//! Gated content reconciliation
//!
//! Walks every tagged node for each known service and swaps its rendered
//! content between the gated variant and the original fallback, depending
//! on the persisted consent decision. Gated markup lives between
//! `<!--if-consent` and `endif-->` markers inside the node's fallback
//! content; everything outside the markers is the fallback itself.

use ccm_store::ConsentMapping;

use crate::dom::{ConsentDom, NodeId};

/// Attribute stashing the node's original fallback markup. Written once,
/// the first time gated content is swapped in, and never overwritten.
pub const FALLBACK_ATTR: &str = "data-consent-fallback";

/// Attribute recording which variant the node currently shows, so repeated
/// syncs with an unchanged mapping never re-render or re-run scripts.
pub const RENDERED_ATTR: &str = "data-consent-rendered";

const RENDERED_GATED: &str = "gated";
const RENDERED_FALLBACK: &str = "fallback";

const BLOCK_START: &str = "<!--if-consent";
const BLOCK_END: &str = "endif-->";

/// Markup between the first start marker and the first end marker after
/// it. Spans newlines. None when either marker is missing.
fn extract_gated_block(html: &str) -> Option<&str> {
    let start = html.find(BLOCK_START)? + BLOCK_START.len();
    let len = html[start..].find(BLOCK_END)?;
    Some(&html[start..start + len])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewSynchronizer;

impl ViewSynchronizer {
    pub fn new() -> Self {
        Self
    }

    /// Reconcile every tagged node against the mapping. Services are
    /// visited in declared order, nodes in document order.
    pub fn sync(&self, dom: &mut dyn ConsentDom, mapping: &ConsentMapping, services: &[String]) {
        for service in services {
            let accepted = mapping.is_accepted(service);

            for node in dom.select_gated(service) {
                if accepted {
                    self.render_gated(dom, node, service);
                } else {
                    self.restore_fallback(dom, node, service);
                }
            }
        }
    }

    fn render_gated(&self, dom: &mut dyn ConsentDom, node: NodeId, service: &str) {
        // One-time fallback capture, before the content is overwritten
        if dom.attribute(node, FALLBACK_ATTR).is_none() {
            let current = dom.inner_html(node);
            dom.set_attribute(node, FALLBACK_ATTR, &current);
        }

        if dom.attribute(node, RENDERED_ATTR).as_deref() == Some(RENDERED_GATED) {
            return;
        }

        let stash = dom.attribute(node, FALLBACK_ATTR).unwrap_or_default();
        let block = match extract_gated_block(&stash) {
            Some(block) => block.to_string(),
            // Missing markers: leave the node's current content alone
            None => return,
        };

        dom.set_inner_html(node, &block);
        self.activate_scripts(dom, node);
        dom.set_attribute(node, RENDERED_ATTR, RENDERED_GATED);

        tracing::debug!(service = %service, node = node.0, "Swapped in gated content");
    }

    fn restore_fallback(&self, dom: &mut dyn ConsentDom, node: NodeId, service: &str) {
        // Never switched to gated content, nothing to restore
        let stash = match dom.attribute(node, FALLBACK_ATTR) {
            Some(stash) => stash,
            None => return,
        };

        if dom.attribute(node, RENDERED_ATTR).as_deref() == Some(RENDERED_FALLBACK) {
            return;
        }

        dom.set_inner_html(node, &stash);
        self.activate_scripts(dom, node);
        dom.set_attribute(node, RENDERED_ATTR, RENDERED_FALLBACK);

        tracing::debug!(service = %service, node = node.0, "Restored fallback content");
    }

    /// Re-create every inline script of the freshly rendered content as an
    /// executable element. Markup insertion alone leaves scripts inert, so
    /// without this step an accepted service would never run.
    fn activate_scripts(&self, dom: &mut dyn ConsentDom, node: NodeId) {
        let scripts = dom.scripts(node);
        if scripts.is_empty() {
            return;
        }

        let sources: Vec<String> = scripts
            .iter()
            .filter_map(|script| dom.script_text(*script))
            .collect();

        // Detach highest ordinal first so the remaining refs stay valid
        for script in scripts.iter().rev() {
            dom.remove_script(*script);
        }

        for source in &sources {
            dom.append_script(node, source);
        }
    }
}
