use std::io;

use pretty_assertions::assert_eq;
use strata_typelist::{TypeKey, TypeList};

use crate::{
	Class, CollectReporter, Hierarchy, HierarchyBuilder, HierarchyError, Instance, Linearization,
	Reporter, ResolveError, View, WalkError, WriteReporter, find_ancestors, find_ancestors_with,
	walk,
};

/// ```text
///                                     F
///                                    / \
///      A                            H   \
///     / \                          / \   \
///    B   C                        I   J   G
///   /   / \                        \ /   / \
///  T   D   E                        K   L   Z
/// ```
fn lattice() -> Hierarchy {
	let mut b = HierarchyBuilder::new();
	for (name, bases) in [
		("A", &[][..]),
		("B", &["A"][..]),
		("C", &["A"][..]),
		("T", &["B"][..]),
		("D", &["C"][..]),
		("E", &["C"][..]),
		("F", &[][..]),
		("G", &["F"][..]),
		("L", &["G"][..]),
		("Z", &["G"][..]),
		("H", &["F"][..]),
		("I", &["H"][..]),
		("J", &["H"][..]),
		("K", &["I", "J"][..]),
	] {
		b.class(name, bases).expect("unique class");
	}
	b.build().expect("valid lattice")
}

fn list(h: &Hierarchy, names: &[&str]) -> TypeList {
	names.iter().map(|name| key(h, name)).collect()
}

fn key(h: &Hierarchy, name: &str) -> TypeKey {
	h.key(name).unwrap_or_else(|| panic!("class {name} declared"))
}

fn names(h: &Hierarchy, keys: impl IntoIterator<Item = TypeKey>) -> Vec<String> {
	keys.into_iter().map(|k| h.display_name(k)).collect()
}

const CANONICAL: &[&str] = &[
	"I", "C", "Z", "G", "D", "F", "L", "C", "I", "A", "T", "B", "J", "K", "H", "E", "E",
];

#[test]
fn test_is_base_of_is_strict_and_transitive() {
	let h = lattice();
	let (a, c, d, f, k) = (key(&h, "A"), key(&h, "C"), key(&h, "D"), key(&h, "F"), key(&h, "K"));
	assert!(h.is_base_of(a, d));
	assert!(h.is_base_of(c, d));
	assert!(h.is_base_of(f, k));
	assert!(!h.is_base_of(d, d));
	assert!(!h.is_base_of(d, a));
	assert!(!h.is_base_of(a, k));
	assert!(!h.is_base_of(TypeKey::from_u32(999), d));
	assert!(!h.is_base_of(a, TypeKey::from_u32(999)));
}

#[test]
fn test_ancestors_nearest_first_without_duplicates() {
	let h = lattice();
	assert_eq!(names(&h, h.ancestors(key(&h, "D")).iter()), vec!["C", "A"]);
	assert_eq!(
		names(&h, h.ancestors(key(&h, "K")).iter()),
		vec!["I", "H", "F", "J"]
	);
	assert!(h.ancestors(key(&h, "A")).is_empty());
	assert_eq!(names(&h, h.direct_bases(key(&h, "K")).iter().copied()), vec!["I", "J"]);
}

#[test]
fn test_forward_references_are_allowed() {
	let mut b = HierarchyBuilder::new();
	b.class("D", &["C"]).expect("declare");
	b.class("C", &["A"]).expect("declare");
	b.class("A", &[]).expect("declare");
	let h = b.build().expect("valid");
	assert!(h.is_base_of(key(&h, "A"), key(&h, "D")));
	assert_eq!(h.len(), 3);
}

#[test]
fn test_unknown_base_is_rejected() {
	let mut b = HierarchyBuilder::new();
	b.class("D", &["C"]).expect("declare");
	assert_eq!(
		b.build().map(|_| ()),
		Err(HierarchyError::UnknownBase {
			class: "D".into(),
			base: "C".into(),
		})
	);
}

#[test]
fn test_duplicate_class_is_rejected() {
	let mut b = HierarchyBuilder::new();
	b.class("A", &[]).expect("declare");
	assert_eq!(
		b.class("A", &[]),
		Err(HierarchyError::DuplicateClass { class: "A".into() })
	);
}

#[test]
fn test_cycle_is_rejected() {
	let mut b = HierarchyBuilder::new();
	b.class("A", &["B"]).expect("declare");
	b.class("B", &["A"]).expect("declare");
	assert!(matches!(b.build(), Err(HierarchyError::Cycle { .. })));

	let mut selfish = HierarchyBuilder::new();
	selfish.class("S", &["S"]).expect("declare");
	assert_eq!(
		selfish.build().map(|_| ()),
		Err(HierarchyError::Cycle { class: "S".into() })
	);
}

#[test]
fn test_deep_chain_closure() {
	const DEPTH: usize = 1500;
	let mut b = HierarchyBuilder::new();
	// Declared leaf first so every base is a forward reference.
	for level in (0..DEPTH).rev() {
		let name = format!("C{level}");
		let base = format!("C{}", level + 1);
		b.class(&name, &[base.as_str()]).expect("declare");
	}
	b.class(&format!("C{DEPTH}"), &[]).expect("declare root");
	let h = b.build().expect("acyclic chain");

	let leaf = key(&h, "C0");
	let root = key(&h, &format!("C{DEPTH}"));
	assert!(h.is_base_of(root, leaf));
	assert_eq!(h.ancestors(leaf).len(), DEPTH);
	assert_eq!(h.ancestors(leaf).first(), Some(key(&h, "C1")));
}

#[test]
fn test_chain_is_root_first_and_excludes_target() {
	let h = lattice();
	let candidates = list(&h, &["A", "C", "D", "Z", "L"]);
	let chain = find_ancestors(&h, &candidates, key(&h, "D"));
	assert_eq!(names(&h, chain.iter()), vec!["A", "C"]);
	assert_eq!(chain.target(), key(&h, "D"));
	assert_eq!(chain.root(), Some(key(&h, "A")));
	assert_eq!(chain.links(), &list(&h, &["A", "C"]));
}

#[test]
fn test_canonical_candidates() {
	let h = lattice();
	let candidates = list(&h, CANONICAL);

	let d = find_ancestors(&h, &candidates, key(&h, "D"));
	assert_eq!(names(&h, d.iter()), vec!["A", "C"]);

	let k = find_ancestors(&h, &candidates, key(&h, "K"));
	assert_eq!(names(&h, k.iter()), vec!["F", "H", "I", "J"]);

	let z = find_ancestors(&h, &candidates, key(&h, "Z"));
	assert_eq!(names(&h, z.iter()), vec!["F", "G"]);
}

#[test]
fn test_diamond_sibling_order_follows_candidates() {
	let h = lattice();
	let candidates = list(&h, &["J", "H", "F", "I", "F", "H"]);
	let chain = find_ancestors(&h, &candidates, key(&h, "K"));
	assert_eq!(names(&h, chain.iter()), vec!["F", "H", "J", "I"]);
}

#[test]
fn test_partial_candidates() {
	let h = lattice();
	let candidates = list(&h, &["I", "C", "Z", "G", "D", "F"]);
	let chain = find_ancestors(&h, &candidates, key(&h, "D"));
	assert_eq!(names(&h, chain.iter()), vec!["C"]);
}

#[test]
fn test_no_ancestors_is_empty_chain() {
	let h = lattice();
	let candidates = list(&h, &["F", "G", "K"]);
	assert!(find_ancestors(&h, &candidates, key(&h, "D")).is_empty());
	assert!(find_ancestors(&h, &candidates, key(&h, "A")).is_empty());
	assert!(find_ancestors(&h, &TypeList::empty(), key(&h, "K")).is_empty());
}

#[test]
fn test_strict_rejects_siblings() {
	let h = lattice();
	let candidates = list(&h, CANONICAL);
	assert_eq!(
		find_ancestors_with(&h, &candidates, key(&h, "K"), Linearization::Strict),
		Err(ResolveError::Ambiguous {
			target: "K".into(),
			left: "I".into(),
			right: "J".into(),
		})
	);
	let d = find_ancestors_with(&h, &candidates, key(&h, "D"), Linearization::Strict)
		.expect("single chain");
	assert_eq!(names(&h, d.iter()), vec!["A", "C"]);
}

#[test]
fn test_walk_reports_each_link_in_order() {
	let h = lattice();
	let chain = find_ancestors(&h, &list(&h, CANONICAL), key(&h, "D"));
	let instance = Instance::new(&h, key(&h, "D")).expect("declared");

	let mut reporter = CollectReporter::default();
	let steps = walk(&chain, &instance, &mut reporter).expect("valid chain");
	assert_eq!(steps, 2);
	assert_eq!(names(&h, reporter.seen), vec!["A", "C"]);
}

#[test]
fn test_walk_writes_lines() {
	let h = lattice();
	let chain = find_ancestors(&h, &list(&h, CANONICAL), key(&h, "K"));
	let instance = Instance::new(&h, key(&h, "K")).expect("declared");

	let mut reporter = WriteReporter::new(Vec::new());
	walk(&chain, &instance, &mut reporter).expect("valid chain");
	let out = String::from_utf8(reporter.into_inner()).expect("utf8");
	assert_eq!(out, "base = F\nbase = H\nbase = I\nbase = J\n");
}

#[test]
fn test_walk_rejects_foreign_chain() {
	let h = lattice();
	let chain = find_ancestors(&h, &list(&h, CANONICAL), key(&h, "K"));
	let instance = Instance::new(&h, key(&h, "D")).expect("declared");

	let mut reporter = CollectReporter::default();
	let err = walk(&chain, &instance, &mut reporter).expect_err("F is not a base of D");
	assert!(matches!(err, WalkError::NotABase { ref base, ref ty } if &**base == "F" && &**ty == "D"));
	assert!(reporter.seen.is_empty());
}

#[test]
fn test_view_as_self_and_unknown_type() {
	let h = lattice();
	let d = Instance::new(&h, key(&h, "D")).expect("declared");
	let view = d.view_as(key(&h, "D")).expect("self view");
	assert_eq!(view.name, "D");
	assert_eq!(view.ty, view.viewed_as);
	assert!(matches!(
		Instance::new(&h, TypeKey::from_u32(999)),
		Err(WalkError::UnknownType { .. })
	));
}

/// Accepts `budget` reports, then fails.
struct FailingReporter {
	budget: usize,
	seen: Vec<TypeKey>,
}

impl Reporter for FailingReporter {
	fn report(&mut self, view: &View<'_>) -> io::Result<()> {
		if self.budget == 0 {
			return Err(io::Error::new(io::ErrorKind::BrokenPipe, "reporter closed"));
		}
		self.budget -= 1;
		self.seen.push(view.viewed_as);
		Ok(())
	}
}

struct BrokenSink;

impl io::Write for BrokenSink {
	fn write(&mut self, _: &[u8]) -> io::Result<usize> {
		Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

#[test]
fn test_walk_stops_at_report_failure() {
	let h = lattice();
	let chain = find_ancestors(&h, &list(&h, CANONICAL), key(&h, "K"));
	let instance = Instance::new(&h, key(&h, "K")).expect("declared");

	let mut reporter = FailingReporter {
		budget: 2,
		seen: Vec::new(),
	};
	let err = walk(&chain, &instance, &mut reporter).expect_err("third report fails");
	assert!(matches!(err, WalkError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
	assert_eq!(names(&h, reporter.seen), vec!["F", "H"]);

	let mut writer = WriteReporter::new(BrokenSink);
	assert!(matches!(
		walk(&chain, &instance, &mut writer),
		Err(WalkError::Io(_))
	));
}

struct Undeclared;

impl Class for Undeclared {
	const NAME: &'static str = "Undeclared";
	const BASES: &'static [&'static str] = &["A"];
}

#[test]
fn test_instance_of_missing_class() {
	let h = lattice();
	assert_eq!(h.key_of::<Undeclared>(), None);
	let err = Instance::of::<Undeclared>(&h).expect_err("class not in hierarchy");
	assert!(matches!(err, WalkError::UnknownClass { ref class } if &**class == "Undeclared"));
	assert_eq!(err.to_string(), "class \"Undeclared\" is not declared in the hierarchy");
}
