// src/services/message_board.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::RwLock;

/// Append-only results area shared by every in-flight demo request.
#[derive(Clone, Default)]
pub struct MessageBoard {
    inner: Arc<RwLock<Vec<String>>>,
}

impl Debug for MessageBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBoard").finish_non_exhaustive()
    }
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // Append one line and return the number of lines on the board.
    pub async fn append(&self, line: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        guard.push(line.into());
        guard.len()
    }

    /// Snapshot of every line, oldest first.
    pub async fn lines(&self) -> Vec<String> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Board contents as an HTML fragment, one `<br/>`-terminated line each.
    pub async fn render_html(&self) -> String {
        let guard = self.inner.read().await;
        guard
            .iter()
            .map(|line| format!("{}<br/>", escape_html(line)))
            .collect()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_keeps_order() {
        let board = MessageBoard::new();
        assert!(board.is_empty().await);
        assert_eq!(board.append("first").await, 1);
        assert_eq!(board.append("second").await, 2);
        assert_eq!(board.lines().await, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn render_escapes_markup() {
        let board = MessageBoard::new();
        board.append("1: Success: <b>hi</b> & bye").await;
        board.append("2: ERROR: canceled").await;
        assert_eq!(
            board.render_html().await,
            "1: Success: &lt;b&gt;hi&lt;/b&gt; &amp; bye<br/>2: ERROR: canceled<br/>"
        );
    }
}
