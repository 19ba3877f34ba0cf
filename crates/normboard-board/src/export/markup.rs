//! Hierarchical markup export of the normative state.

use serde::Serialize;

use normboard_core::models::{NormativeState, Obligation};

/// An element with attributes, children and optional text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
    pub text: Option<String>,
}

impl MarkupNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    pub fn child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MarkupNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn write_xml(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push_str(&format!(" {key}=\"{}\"", escape(value)));
        }
        match (&self.text, self.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                out.push_str(&format!(">{}</{}>\n", escape(text), self.name));
            }
            (text, false) => {
                out.push_str(">\n");
                if let Some(text) = text {
                    out.push_str(&format!("{indent}  {}\n", escape(text)));
                }
                for child in &self.children {
                    child.write_xml(depth + 1, out);
                }
                out.push_str(&format!("{indent}</{}>\n", self.name));
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Markup view of a board, rooted at `normative-board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupDocument {
    pub root: MarkupNode,
}

impl MarkupDocument {
    pub fn from_state(board_id: &str, state: &NormativeState) -> Self {
        let mut root = MarkupNode::new("normative-board")
            .attr("id", board_id)
            .attr("verifications", state.verification_count);
        if let Some(verified_at) = state.verified_at {
            root = root.attr("verified-at", verified_at);
        }

        if let Some(program) = &state.program {
            let mut node = MarkupNode::new("program")
                .attr("name", &program.name)
                .attr("fingerprint", &program.fingerprint);
            for norm in &program.norms {
                node = node.child(MarkupNode::new("norm").text(norm.as_str()));
            }
            root = root.child(node);
        }

        let facts = state.facts.iter().fold(MarkupNode::new("facts"), |node, fact| {
            node.child(MarkupNode::new("fact").text(fact.to_string()))
        });
        let obligations = state
            .obligations
            .iter()
            .fold(MarkupNode::new("obligations"), |node, o| {
                node.child(obligation_node(o))
            });

        Self {
            root: root.child(facts).child(obligations),
        }
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.root.write_xml(0, &mut out);
        out
    }
}

fn obligation_node(obligation: &Obligation) -> MarkupNode {
    MarkupNode::new("obligation")
        .attr("norm", &obligation.norm_id)
        .attr("bearer", &obligation.bearer)
        .attr("reason", &obligation.reason)
        .attr("goal", &obligation.goal)
        .attr("deadline", obligation.deadline)
        .attr("created", obligation.created_at)
        .attr("state", obligation.state)
}
