//! Selector subset for the in-memory document
//!
//! Supported: type (`li`), universal (`*`), id (`#menu`), class (`.red`),
//! compounds (`li.red.big`), descendant (`ul li`) and child (`ul > li`)
//! combinators, and comma-separated groups. Matching is against the whole
//! tree, so ancestors above the query root can satisfy a combinator.

use std::iter::Peekable;
use std::str::Chars;

use super::node::Node;
use crate::error::EventError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        self.tag.as_deref().map_or(true, |tag| node.tag() == tag)
            && self
                .id
                .as_deref()
                .map_or(true, |id| node.id().as_deref() == Some(id))
            && self.classes.iter().all(|class| node.has_class(class))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// One comma-free selector: compounds joined by combinators
///
/// The combinator stored with a compound links it to the compound before it;
/// the first one is never consulted.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches(&self, node: &Node) -> bool {
        self.matches_at(node, self.parts.len() - 1)
    }

    fn matches_at(&self, node: &Node, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        if !compound.matches(node) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match combinator {
            Combinator::Child => node
                .parent()
                .is_some_and(|parent| self.matches_at(&parent, index - 1)),
            Combinator::Descendant => node
                .ancestors()
                .iter()
                .any(|ancestor| self.matches_at(ancestor, index - 1)),
        }
    }
}

/// A parsed, comma-separated selector list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    groups: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(selector: &str) -> Result<Self, EventError> {
        let groups = selector
            .split(',')
            .map(|group| parse_complex(group.trim(), selector))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { groups })
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.groups.iter().any(|group| group.matches(node))
    }
}

fn parse_complex(group: &str, selector: &str) -> Result<Complex, EventError> {
    if group.is_empty() {
        return Err(EventError::invalid_selector(selector, "empty selector"));
    }

    let mut parts: Vec<(Combinator, Compound)> = Vec::new();
    let mut pending: Option<Combinator> = None;
    let mut chars = group.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            if pending.is_none() && !parts.is_empty() {
                pending = Some(Combinator::Descendant);
            }
            continue;
        }
        if c == '>' {
            chars.next();
            if parts.is_empty() || pending == Some(Combinator::Child) {
                return Err(EventError::invalid_selector(selector, "dangling '>'"));
            }
            pending = Some(Combinator::Child);
            continue;
        }

        let compound = parse_compound(&mut chars, selector)?;
        let combinator = if parts.is_empty() {
            Combinator::Descendant
        } else {
            pending
                .take()
                .ok_or_else(|| EventError::invalid_selector(selector, "missing combinator"))?
        };
        parts.push((combinator, compound));
        pending = None;
    }

    if pending == Some(Combinator::Child) {
        return Err(EventError::invalid_selector(selector, "dangling '>'"));
    }
    Ok(Complex { parts })
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>, selector: &str) -> Result<Compound, EventError> {
    let mut compound = Compound::default();
    let mut consumed = false;

    match chars.peek() {
        Some('*') => {
            chars.next();
            consumed = true;
        }
        Some(&c) if is_name_char(c) => {
            compound.tag = Some(read_name(chars).to_lowercase());
            consumed = true;
        }
        _ => {}
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' | '.' => {
                chars.next();
                let name = read_name(chars);
                if name.is_empty() {
                    let what = if c == '#' { "empty id" } else { "empty class name" };
                    return Err(EventError::invalid_selector(selector, what));
                }
                if c == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
                consumed = true;
            }
            c if c.is_whitespace() || c == '>' => break,
            other => {
                return Err(EventError::invalid_selector(
                    selector,
                    format!("unexpected character '{other}'"),
                ))
            }
        }
    }

    if !consumed {
        return Err(EventError::invalid_selector(selector, "empty compound"));
    }
    Ok(compound)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !is_name_char(c) {
            break;
        }
        name.push(c);
        chars.next();
    }
    name
}
