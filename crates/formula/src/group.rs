//! Grouping - Left-to-right scan merging symbol runs and attaching exponents
//!
//! A candidate is an exponent of the current accumulator when it sits
//! entirely above the accumulator's top edge. Exponent candidates are held
//! in a buffer and parsed as their own region once the scan comes back down.

use crate::error::{FormulaError, FormulaResult};
use crate::model::{Item, Node};
use crate::parser::{parse_region, RegionContext};
use crate::symbol::Kind;
use tracing::trace;

/// Group the items of one region into base-line nodes, sorted by x.
pub fn group_items(items: Vec<Item>, ctx: &RegionContext<'_>) -> FormulaResult<Vec<Node>> {
    let mut items = items;
    items.sort_by(|a, b| a.rect().x().total_cmp(&b.rect().x()));

    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return Ok(Vec::new());
    };

    let mut output = Vec::new();
    let mut current = Node::from(first);
    let mut exponent: Vec<Item> = Vec::new();

    for item in items {
        if is_power(&current, &item) {
            if ctx.exponent_depth >= ctx.config.max_exponent_depth {
                return Err(FormulaError::NestedExponent);
            }
            exponent.push(item);
            continue;
        }

        if !exponent.is_empty() {
            attach_power(&mut current, std::mem::take(&mut exponent), ctx)?;
            output.push(std::mem::replace(&mut current, Node::from(item)));
            continue;
        }

        let item = match (&mut current, item) {
            (Node::Group(group), Item::Symbol(symbol)) if group.accepts(&symbol) => {
                group.append(symbol);
                continue;
            }
            (_, item) => item,
        };
        output.push(std::mem::replace(&mut current, Node::from(item)));
    }

    if !exponent.is_empty() {
        attach_power(&mut current, exponent, ctx)?;
    }
    output.push(current);
    Ok(output)
}

/// Whether `candidate` is an exponent of `base`. Operators never take one.
fn is_power(base: &Node, candidate: &Item) -> bool {
    base.kind() != Kind::MathOperator && base.rect().top() >= candidate.rect().bottom()
}

fn attach_power(base: &mut Node, exponent: Vec<Item>, ctx: &RegionContext<'_>) -> FormulaResult<()> {
    trace!(
        target: "formula::group",
        items = exponent.len(),
        depth = ctx.exponent_depth + 1,
        "attaching exponent"
    );
    let power = parse_region(exponent, &ctx.nested_exponent())?;
    base.set_power(power);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::geometry::Rect;
    use crate::model::{Expression, Fraction, Group};
    use crate::symbol::LabeledBox;

    fn symbol(label: char, x: f32, y: f32, width: f32, height: f32) -> LabeledBox {
        LabeledBox::new(label, Rect::new(x, y, width, height)).unwrap()
    }

    fn item(label: char, x: f32, y: f32) -> Item {
        Item::Symbol(symbol(label, x, y, 8.0, 12.0))
    }

    fn texts(nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node {
                Node::Group(group) => group.text(),
                Node::Fraction(_) => "<fraction>".to_string(),
            })
            .collect()
    }

    fn group_nodes(items: Vec<Item>) -> FormulaResult<Vec<Node>> {
        let config = ParserConfig::default();
        let ctx = RegionContext::new(&config, &[]);
        group_items(items, &ctx)
    }

    #[test]
    fn test_runs_merge_by_kind() {
        let items = vec![
            item('1', 0.0, 50.0),
            item('2', 10.0, 50.0),
            item('X', 20.0, 50.0),
            item('Y', 30.0, 50.0),
            item('+', 40.0, 50.0),
            item('+', 50.0, 50.0),
            item('(', 60.0, 50.0),
            item('(', 70.0, 50.0),
        ];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["12", "XY", "+", "+", "(", "("]);
    }

    #[test]
    fn test_sorted_by_x() {
        let items = vec![item('3', 20.0, 50.0), item('+', 10.0, 50.0), item('2', 0.0, 50.0)];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["2", "+", "3"]);
    }

    #[test]
    fn test_exponent_attached() {
        let items = vec![
            Item::Symbol(symbol('2', 10.0, 50.0, 10.0, 14.0)),
            Item::Symbol(symbol('3', 18.0, 35.0, 6.0, 8.0)),
        ];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["2"]);
        let power = nodes[0].power().expect("power");
        assert_eq!(texts(power.base()), vec!["3"]);
    }

    #[test]
    fn test_exponent_closes_run() {
        // X squared followed by Y: Y starts a new group even though it is a letter
        let items = vec![
            Item::Symbol(symbol('X', 10.0, 50.0, 8.0, 12.0)),
            Item::Symbol(symbol('2', 17.0, 38.0, 5.0, 7.0)),
            Item::Symbol(symbol('1', 21.0, 38.0, 3.0, 7.0)),
            Item::Symbol(symbol('Y', 30.0, 50.0, 8.0, 12.0)),
        ];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["X", "Y"]);
        assert_eq!(texts(nodes[0].power().unwrap().base()), vec!["21"]);
        assert!(nodes[1].power().is_none());
    }

    #[test]
    fn test_operator_takes_no_exponent() {
        let items = vec![
            Item::Symbol(symbol('+', 10.0, 50.0, 8.0, 8.0)),
            Item::Symbol(symbol('2', 18.0, 30.0, 6.0, 8.0)),
        ];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["+", "2"]);
        assert!(nodes[0].power().is_none());
    }

    #[test]
    fn test_parenthesis_takes_exponent() {
        let items = vec![
            Item::Symbol(symbol('(', 0.0, 50.0, 4.0, 16.0)),
            Item::Symbol(symbol('X', 8.0, 50.0, 8.0, 12.0)),
            Item::Symbol(symbol(')', 16.0, 50.0, 4.0, 16.0)),
            Item::Symbol(symbol('2', 22.0, 34.0, 5.0, 8.0)),
        ];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["(", "X", ")"]);
        assert_eq!(texts(nodes[2].power().unwrap().base()), vec!["2"]);
    }

    #[test]
    fn test_fraction_is_its_own_node() {
        let fraction = Fraction::new(
            Expression::new(vec![Node::Group(Group::new(symbol('1', 30.0, 40.0, 6.0, 12.0)))]),
            Expression::new(vec![Node::Group(Group::new(symbol('2', 30.0, 60.0, 8.0, 12.0)))]),
        );
        let items = vec![
            item('3', 0.0, 50.0),
            item('4', 10.0, 50.0),
            Item::Fraction(fraction),
            item('5', 50.0, 50.0),
        ];
        let nodes = group_nodes(items).unwrap();
        assert_eq!(texts(&nodes), vec!["34", "<fraction>", "5"]);
    }

    #[test]
    fn test_nested_exponent_rejected() {
        let items = vec![
            Item::Symbol(symbol('2', 10.0, 50.0, 10.0, 14.0)),
            Item::Symbol(symbol('3', 18.0, 35.0, 6.0, 8.0)),
            Item::Symbol(symbol('4', 24.0, 24.0, 4.0, 6.0)),
        ];
        assert!(matches!(
            group_nodes(items),
            Err(FormulaError::NestedExponent)
        ));
    }

    #[test]
    fn test_empty_region() {
        assert!(group_nodes(Vec::new()).unwrap().is_empty());
    }
}
