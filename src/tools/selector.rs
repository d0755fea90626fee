//! Tool selection
//!
//! Keep tools whose `can_handle` is true, take the maximal `score`.
//! Ties go to the earliest tool in declaration order.

use super::{ToolHandler, ToolSet};
use std::sync::Arc;

/// Picks the tool for a turn. Custom selectors may use the input embedding;
/// the default one ignores it.
pub trait ToolSelector: Send + Sync {
    fn select(
        &self,
        input: &str,
        embedding: Option<&[f32]>,
        tools: &ToolSet,
    ) -> Option<Arc<dyn ToolHandler>>;
}

/// Default score-based selector
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreSelector;

impl ToolSelector for ScoreSelector {
    fn select(
        &self,
        input: &str,
        _embedding: Option<&[f32]>,
        tools: &ToolSet,
    ) -> Option<Arc<dyn ToolHandler>> {
        select_tool(input, tools)
    }
}

pub fn select_tool(input: &str, tools: &ToolSet) -> Option<Arc<dyn ToolHandler>> {
    let mut best: Option<(i32, &Arc<dyn ToolHandler>)> = None;

    for tool in tools.iter().filter(|t| t.can_handle(input)) {
        let score = tool.score(input);
        // strict: an equal score never displaces an earlier tool
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, tool));
        }
    }

    best.map(|(_, tool)| Arc::clone(tool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    struct FixedTool {
        name: &'static str,
        handles: bool,
        score: i32,
    }

    #[async_trait::async_trait]
    impl ToolHandler for FixedTool {
        fn name(&self) -> &str {
            self.name
        }

        fn can_handle(&self, _input: &str) -> bool {
            self.handles
        }

        fn score(&self, _input: &str) -> i32 {
            self.score
        }

        async fn handle(&self, input: &str) -> Result<String> {
            Ok(input.to_string())
        }
    }

    fn tool(name: &'static str, handles: bool, score: i32) -> Arc<dyn ToolHandler> {
        Arc::new(FixedTool { name, handles, score })
    }

    #[test]
    fn test_highest_score_wins() {
        let tools = ToolSet::new()
            .with(tool("low", true, 1))
            .with(tool("high", true, 9))
            .with(tool("mid", true, 5));

        let chosen = select_tool("x", &tools).unwrap();
        assert_eq!(chosen.name(), "high");
    }

    #[test]
    fn test_non_handling_tools_are_ignored_whatever_their_score() {
        let tools = ToolSet::new()
            .with(tool("refuses", false, 100))
            .with(tool("accepts", true, 1));

        assert_eq!(select_tool("x", &tools).unwrap().name(), "accepts");
    }

    #[test]
    fn test_tie_resolves_to_earliest_declared() {
        let tools = ToolSet::new()
            .with(tool("first", true, 7))
            .with(tool("second", true, 7))
            .with(tool("third", true, 7));

        for _ in 0..10 {
            assert_eq!(select_tool("x", &tools).unwrap().name(), "first");
        }
    }

    #[test]
    fn test_no_candidate_yields_none() {
        let tools = ToolSet::new().with(tool("refuses", false, 3));
        assert!(select_tool("x", &tools).is_none());
        assert!(select_tool("x", &ToolSet::new()).is_none());
    }

    #[test]
    fn test_score_selector_ignores_embedding() {
        let tools = ToolSet::new()
            .with(tool("a", true, 2))
            .with(tool("b", true, 4));

        let chosen = ScoreSelector.select("x", Some([0.1, 0.2].as_slice()), &tools).unwrap();
        assert_eq!(chosen.name(), "b");
    }

    #[test]
    fn test_builtin_scores_route_by_intent() {
        let tools = ToolSet::new()
            .with(Arc::new(crate::tools::WebSearchTool::new()))
            .with(Arc::new(crate::tools::FileReaderTool))
            .with(Arc::new(crate::tools::CalculatorTool));

        assert_eq!(select_tool("12 * (3 + 4)", &tools).unwrap().name(), "calculator");
        assert_eq!(select_tool("read file notes.md", &tools).unwrap().name(), "file_reader");
        assert_eq!(select_tool("search rust async", &tools).unwrap().name(), "web_search");
        assert!(select_tool("good morning", &tools).is_none());
    }
}
