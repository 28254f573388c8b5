//! Namespace-agnostic helpers over `roxmltree` nodes
//!
//! The feed mixes prefixed and unprefixed element names and declares node
//! types through `xsi:type`. Every lookup here therefore matches on local
//! names only and ignores namespaces entirely.

use roxmltree::Node;

/// True when the node is an element with the given local name
pub fn has_local_name(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Element descendants of `scope` in document order, excluding `scope` itself
pub fn element_descendants<'a, 'input>(
    scope: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    scope.descendants().skip(1).filter(|node| node.is_element())
}

/// Element descendants of `scope` with the given local name
pub fn descendants_named<'a, 'input>(
    scope: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    element_descendants(scope).filter(move |node| node.tag_name().name() == name)
}

/// First element descendant of `scope` with the given local name
pub fn first_descendant_named<'a, 'input>(
    scope: Node<'a, 'input>,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    descendants_named(scope, name).next()
}

/// Value of the first attribute whose local name matches, in any namespace
pub fn attribute_by_local_name<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attribute| attribute.name() == name)
        .map(|attribute| attribute.value())
}

/// Declared type of a node (`xsi:type` or plain `type`)
pub fn type_attribute<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    attribute_by_local_name(node, crate::constants::attributes::TYPE)
}

/// Language tag of a node (`lang` or `xml:lang`)
pub fn lang_attribute<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    attribute_by_local_name(node, crate::constants::attributes::LANG)
}

/// Concatenated text of the node and all its descendants
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|descendant| descendant.is_text())
        .filter_map(|descendant| descendant.text())
        .collect()
}

/// Trimmed text content, `None` when blank
pub fn trimmed_text(node: Node<'_, '_>) -> Option<String> {
    let text = text_content(node);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trimmed text of the first descendant with the given local name
pub fn descendant_text(scope: Node<'_, '_>, name: &'static str) -> Option<String> {
    first_descendant_named(scope, name).and_then(trimmed_text)
}
