//! Stdin command language of the console front end.

use anyhow::{anyhow, bail, Context};
use results_core::{ActionKind, FilterSelection, PaginationData, FIRST_PAGE, NO_FILTER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMove {
    Next,
    Prev,
    Reset,
    To(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `filter year=2020 topic=*`; `*` clears a dimension.
    Filter(Vec<(String, String)>),
    Page(PageMove),
    Back,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let command = match verb {
        "filter" => {
            let pairs = words
                .map(|word| -> anyhow::Result<(String, String)> {
                    let (dimension, value) = word
                        .split_once('=')
                        .ok_or_else(|| anyhow!("expected dimension=value, got {word:?}"))?;
                    if dimension.is_empty() || value.is_empty() {
                        bail!("empty dimension or value in {word:?}");
                    }
                    Ok((dimension.to_string(), value.to_string()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            if pairs.is_empty() {
                bail!("filter needs at least one dimension=value");
            }
            Command::Filter(pairs)
        }
        "page" => {
            let target = words.next().ok_or_else(|| anyhow!("page needs an argument"))?;
            Command::Page(match target {
                "next" => PageMove::Next,
                "prev" => PageMove::Prev,
                "reset" => PageMove::Reset,
                number => PageMove::To(
                    number
                        .parse()
                        .with_context(|| format!("invalid page {number:?}"))?,
                ),
            })
        }
        "back" => Command::Back,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(command))
}

/// Applies `filter` overrides on top of the current selection.
pub fn apply_filters(current: &FilterSelection, pairs: &[(String, String)]) -> FilterSelection {
    let mut selection = current.clone();
    for (dimension, value) in pairs {
        selection.set(dimension.as_str(), value.as_str());
    }
    selection
}

/// Pagination change the pagination UI would report for a move from `current`.
pub fn move_page(current: &PaginationData, page_move: &PageMove) -> PaginationData {
    let (page, action) = match page_move {
        PageMove::Next => (current.current.saturating_add(1), ActionKind::Next),
        PageMove::Prev => (
            current.current.saturating_sub(1).max(FIRST_PAGE),
            ActionKind::Prev,
        ),
        PageMove::Reset => (FIRST_PAGE, ActionKind::Reset),
        PageMove::To(page) => (*page, ActionKind::Jump),
    };
    PaginationData::new(page, current.total).with_action(action)
}

pub const HELP: &str = "\
commands:
  filter <dimension>=<value> ...   change filters (value * clears)
  page next|prev|reset|<n>         change page
  back                             go to the previous history entry
  quit                             exit";

/// One-line summary of a selection for console output.
pub fn describe_selection(selection: &FilterSelection) -> String {
    let parts: Vec<String> = selection
        .iter()
        .filter(|(_, value)| *value != NO_FILTER)
        .map(|(dimension, value)| format!("{dimension}={value}"))
        .collect();
    if parts.is_empty() {
        "no filters".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use results_core::{ActionKind, FilterSelection, PaginationData};

    use super::{apply_filters, describe_selection, move_page, parse, Command, PageMove};

    #[test]
    fn parses_filter_pairs_in_input_order() {
        assert_eq!(
            parse("filter topic=design year=2020").unwrap(),
            Some(Command::Filter(vec![
                ("topic".to_string(), "design".to_string()),
                ("year".to_string(), "2020".to_string()),
            ]))
        );
    }

    #[test]
    fn parses_page_moves_and_blank_lines() {
        assert_eq!(parse("page next").unwrap(), Some(Command::Page(PageMove::Next)));
        assert_eq!(parse("page 4").unwrap(), Some(Command::Page(PageMove::To(4))));
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("filter year").is_err());
        assert!(parse("filter").is_err());
        assert!(parse("page soon").is_err());
        assert!(parse("jump 3").is_err());
    }

    #[test]
    fn filter_overrides_keep_other_dimensions() {
        let current = FilterSelection::new().with("year", "2020").with("topic", "design");
        let next = apply_filters(
            &current,
            &[
                ("topic".to_string(), "*".to_string()),
                ("month".to_string(), "05".to_string()),
            ],
        );
        assert_eq!(next.get("year"), "2020");
        assert_eq!(next.get("month"), "05");
        assert!(!next.is_filtered("topic"));
        assert_eq!(describe_selection(&next), "month=05 year=2020");
    }

    #[test]
    fn page_moves_carry_action_kind() {
        let current = PaginationData::new(1, 4);
        assert_eq!(
            move_page(&current, &PageMove::Prev),
            PaginationData::new(1, 4).with_action(ActionKind::Prev)
        );
        assert_eq!(
            move_page(&current, &PageMove::Next),
            PaginationData::new(2, 4).with_action(ActionKind::Next)
        );
        assert_eq!(
            move_page(&current, &PageMove::To(3)),
            PaginationData::new(3, 4).with_action(ActionKind::Jump)
        );
    }
}
