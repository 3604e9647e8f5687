//! Element tree
//!
//! A minimal document model: tag, ordered class list, ordered attributes,
//! optional text and children. Lookups are depth-first in document order.

use indexmap::IndexMap;

/// A node in the rendered tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create element with tag
    #[inline]
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// With classes (whitespace separated)
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    /// With attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.insert(name.into(), value.to_string());
        self
    }

    /// With text content
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// With child
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// With children
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Tag name
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Class list in insertion order
    #[inline]
    #[must_use]
    pub fn class_list(&self) -> &[String] {
        &self.classes
    }

    /// Attributes in insertion order
    #[inline]
    #[must_use]
    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    /// Attribute value
    #[inline]
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Text content of this node only
    #[inline]
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Direct children
    #[inline]
    #[must_use]
    pub fn child_nodes(&self) -> &[Element] {
        &self.children
    }

    /// Whether the class list contains `class`
    #[inline]
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add class if absent
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove class if present
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Set attribute
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    /// Remove attribute
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.shift_remove(name);
    }

    /// Replace text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Replace all children
    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.children = children;
    }

    /// Append a child
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First element (self included) matching `pred`
    #[must_use]
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(pred))
    }

    /// Mutable first element (self included) matching `pred`
    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(pred))
    }

    /// Every element (self included) matching `pred`, in document order
    #[must_use]
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect(pred, &mut out);
        out
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(pred, out);
        }
    }

    /// Apply `f` to every element matching `pred`
    pub fn for_each_mut(&mut self, pred: &dyn Fn(&Element) -> bool, f: &mut dyn FnMut(&mut Element)) {
        if pred(self) {
            f(self);
        }
        for child in &mut self.children {
            child.for_each_mut(pred, f);
        }
    }

    /// First descendant (self included) carrying `class`
    #[must_use]
    pub fn by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    /// Mutable first descendant (self included) carrying `class`
    pub fn by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.find_mut(&|e| e.has_class(class))
    }

    /// Every descendant (self included) carrying `class`
    #[must_use]
    pub fn all_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(&|e| e.has_class(class))
    }

    /// First descendant (self included) whose attribute `name` equals `value`
    #[must_use]
    pub fn by_attr(&self, name: &str, value: &str) -> Option<&Element> {
        self.find(&|e| e.get_attr(name) == Some(value))
    }

    /// Mutable variant of [`Element::by_attr`]
    pub fn by_attr_mut(&mut self, name: &str, value: &str) -> Option<&mut Element> {
        self.find_mut(&|e| e.get_attr(name) == Some(value))
    }

    /// Index path of the first element matching `pred`
    #[must_use]
    pub fn path_to(&self, pred: &dyn Fn(&Element) -> bool) -> Option<Vec<usize>> {
        if pred(self) {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(i, c)| {
            c.path_to(pred).map(|mut rest| {
                rest.insert(0, i);
                rest
            })
        })
    }

    /// Element at an index path
    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get_mut(*first)?.at_path_mut(rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        Element::new("ul").class("list").children([
            Element::new("li").class("item").attr("data-id", 1).text("one"),
            Element::new("li")
                .class("item special")
                .attr("data-id", 2)
                .child(Element::new("span").class("inner").text("two")),
        ])
    }

    #[test]
    fn builder_dedups_classes() {
        let e = Element::new("div").class("a b a");
        assert_eq!(e.class_list(), ["a", "b"]);
    }

    #[test]
    fn lookups_in_document_order() {
        let t = tree();
        assert_eq!(t.all_by_class("item").len(), 2);
        assert_eq!(t.by_attr("data-id", "2").unwrap().tag(), "li");
        assert_eq!(t.by_class("inner").unwrap().text_content(), Some("two"));
        assert!(t.by_class("missing").is_none());
    }

    #[test]
    fn mutation_through_visitors() {
        let mut t = tree();
        t.for_each_mut(&|e| e.has_class("item"), &mut |e| e.add_class("hide"));
        assert_eq!(t.all_by_class("hide").len(), 2);

        t.by_attr_mut("data-id", "1").unwrap().remove_class("hide");
        assert_eq!(t.all_by_class("hide").len(), 1);
    }

    #[test]
    fn path_navigation() {
        let mut t = tree();
        let path = t.path_to(&|e| e.has_class("inner")).unwrap();
        assert_eq!(path, vec![1, 0]);
        t.at_path_mut(&path).unwrap().set_text("changed");
        assert_eq!(t.by_class("inner").unwrap().text_content(), Some("changed"));
    }
}
