//! Entailment rules of the forward chainer and the profiles grouping them.
//!
//! Rule identifiers follow the OWL 2 RL/RDF rule names of the W3C specification.

use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{NamedNodeRef, NamedOrBlankNodeRef, TermRef, Triple, TripleRef};

/// An entailment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    // Schema rules
    ScmSco,  // SubClassOf transitivity
    ScmSpo,  // SubPropertyOf transitivity
    ScmEqc1, // EquivalentClass => mutual SubClassOf
    ScmEqp1, // EquivalentProperty => mutual SubPropertyOf

    // Class axiom rules
    CaxSco, // SubClassOf

    // Property axiom rules
    PrpDom,  // Domain
    PrpRng,  // Range
    PrpSpo1, // SubPropertyOf
    PrpSymp, // SymmetricProperty
    PrpTrp,  // TransitiveProperty
    PrpInv1, // InverseOf (1)
    PrpInv2, // InverseOf (2)

    // Equality rules
    EqSym,   // Symmetry of =
    EqTrans, // Transitivity of =
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Self::ScmSco => "scm-sco",
            Self::ScmSpo => "scm-spo",
            Self::ScmEqc1 => "scm-eqc1",
            Self::ScmEqp1 => "scm-eqp1",
            Self::CaxSco => "cax-sco",
            Self::PrpDom => "prp-dom",
            Self::PrpRng => "prp-rng",
            Self::PrpSpo1 => "prp-spo1",
            Self::PrpSymp => "prp-symp",
            Self::PrpTrp => "prp-trp",
            Self::PrpInv1 => "prp-inv1",
            Self::PrpInv2 => "prp-inv2",
            Self::EqSym => "eq-sym",
            Self::EqTrans => "eq-trans",
        }
    }

    /// Pushes into `inferred` the conclusions of the rule over `graph` that are not in `graph` yet.
    ///
    /// `inferred` might contain duplicates.
    pub fn apply(self, graph: &oxrdf::Graph, inferred: &mut Vec<Triple>) {
        let mut out = Conclusions { graph, inferred };
        match self {
            Self::ScmSco => out.transitive(rdfs::SUB_CLASS_OF),
            Self::ScmSpo => out.transitive(rdfs::SUB_PROPERTY_OF),
            Self::ScmEqc1 => out.equivalence(owl::EQUIVALENT_CLASS, rdfs::SUB_CLASS_OF),
            Self::ScmEqp1 => out.equivalence(owl::EQUIVALENT_PROPERTY, rdfs::SUB_PROPERTY_OF),
            Self::CaxSco => {
                for axiom in graph.triples_for_predicate(rdfs::SUB_CLASS_OF) {
                    for instance in graph.subjects_for_predicate_object(rdf::TYPE, axiom.subject) {
                        out.emit(instance, rdf::TYPE, axiom.object);
                    }
                }
            }
            Self::PrpDom => {
                for axiom in graph.triples_for_predicate(rdfs::DOMAIN) {
                    let Some(property) = property(axiom.subject) else {
                        continue;
                    };
                    for t in graph.triples_for_predicate(property) {
                        out.emit(t.subject, rdf::TYPE, axiom.object);
                    }
                }
            }
            Self::PrpRng => {
                for axiom in graph.triples_for_predicate(rdfs::RANGE) {
                    let Some(property) = property(axiom.subject) else {
                        continue;
                    };
                    for t in graph.triples_for_predicate(property) {
                        if let Some(object) = node(t.object) {
                            out.emit(object, rdf::TYPE, axiom.object);
                        }
                    }
                }
            }
            Self::PrpSpo1 => {
                for axiom in graph.triples_for_predicate(rdfs::SUB_PROPERTY_OF) {
                    let (Some(sub), Some(sup)) =
                        (property(axiom.subject), property_term(axiom.object))
                    else {
                        continue;
                    };
                    for t in graph.triples_for_predicate(sub) {
                        out.emit(t.subject, sup, t.object);
                    }
                }
            }
            Self::PrpSymp => {
                for property in typed_properties(graph, owl::SYMMETRIC_PROPERTY) {
                    out.symmetric(property);
                }
            }
            Self::PrpTrp => {
                for property in typed_properties(graph, owl::TRANSITIVE_PROPERTY) {
                    out.transitive(property);
                }
            }
            Self::PrpInv1 | Self::PrpInv2 => {
                for axiom in graph.triples_for_predicate(owl::INVERSE_OF) {
                    let (Some(p1), Some(p2)) =
                        (property(axiom.subject), property_term(axiom.object))
                    else {
                        continue;
                    };
                    let (from, to) = if self == Self::PrpInv1 {
                        (p1, p2)
                    } else {
                        (p2, p1)
                    };
                    for t in graph.triples_for_predicate(from) {
                        if let Some(object) = node(t.object) {
                            out.emit(object, to, t.subject);
                        }
                    }
                }
            }
            Self::EqSym => out.symmetric(owl::SAME_AS),
            Self::EqTrans => out.transitive(owl::SAME_AS),
        }
    }
}

/// A named set of rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Transitivity of the class and property hierarchies only.
    Trans,
    /// The RDFS entailment rules, without axiomatic triples.
    Rdfs,
    /// RDFS plus the OWL property characteristics, equivalences and `owl:sameAs`.
    OwlRl,
}

impl Profile {
    pub const ALL: [Self; 3] = [Self::OwlRl, Self::Rdfs, Self::Trans];

    pub fn name(self) -> &'static str {
        match self {
            Self::Trans => "trans",
            Self::Rdfs => "rdfs",
            Self::OwlRl => "owl-rl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn rules(self) -> &'static [Rule] {
        match self {
            Self::Trans => &[Rule::ScmSco, Rule::ScmSpo],
            Self::Rdfs => &[
                Rule::ScmSco,
                Rule::ScmSpo,
                Rule::CaxSco,
                Rule::PrpSpo1,
                Rule::PrpDom,
                Rule::PrpRng,
            ],
            Self::OwlRl => &[
                Rule::ScmSco,
                Rule::ScmSpo,
                Rule::ScmEqc1,
                Rule::ScmEqp1,
                Rule::CaxSco,
                Rule::PrpSpo1,
                Rule::PrpDom,
                Rule::PrpRng,
                Rule::PrpSymp,
                Rule::PrpTrp,
                Rule::PrpInv1,
                Rule::PrpInv2,
                Rule::EqSym,
                Rule::EqTrans,
            ],
        }
    }
}

struct Conclusions<'a, 'b> {
    graph: &'a oxrdf::Graph,
    inferred: &'b mut Vec<Triple>,
}

impl<'a> Conclusions<'a, '_> {
    fn emit(
        &mut self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        predicate: impl Into<NamedNodeRef<'a>>,
        object: impl Into<TermRef<'a>>,
    ) {
        let triple = TripleRef::new(subject, predicate, object);
        if !self.graph.contains(triple) {
            self.inferred.push(triple.into_owned());
        }
    }

    fn transitive(&mut self, predicate: NamedNodeRef<'a>) {
        let graph = self.graph;
        for t in graph.triples_for_predicate(predicate) {
            let Some(middle) = node(t.object) else {
                continue;
            };
            for object in graph.objects_for_subject_predicate(middle, predicate) {
                self.emit(t.subject, predicate, object);
            }
        }
    }

    fn symmetric(&mut self, predicate: NamedNodeRef<'a>) {
        let graph = self.graph;
        for t in graph.triples_for_predicate(predicate) {
            if let Some(object) = node(t.object) {
                self.emit(object, predicate, t.subject);
            }
        }
    }

    fn equivalence(&mut self, equivalence: NamedNodeRef<'a>, subsumption: NamedNodeRef<'a>) {
        let graph = self.graph;
        for t in graph.triples_for_predicate(equivalence) {
            if let Some(object) = node(t.object) {
                self.emit(t.subject, subsumption, object);
                self.emit(object, subsumption, t.subject);
            }
        }
    }
}

fn typed_properties<'a>(
    graph: &'a oxrdf::Graph,
    class: NamedNodeRef<'a>,
) -> impl Iterator<Item = NamedNodeRef<'a>> + 'a {
    graph
        .subjects_for_predicate_object(rdf::TYPE, class)
        .filter_map(property)
}

fn node(term: TermRef<'_>) -> Option<NamedOrBlankNodeRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

fn property(node: NamedOrBlankNodeRef<'_>) -> Option<NamedNodeRef<'_>> {
    match node {
        NamedOrBlankNodeRef::NamedNode(node) => Some(node),
        NamedOrBlankNodeRef::BlankNode(_) => None,
    }
}

fn property_term(term: TermRef<'_>) -> Option<NamedNodeRef<'_>> {
    if let TermRef::NamedNode(node) = term {
        Some(node)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn ex(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn conclusions(rule: Rule, triples: &[Triple]) -> oxrdf::Graph {
        let mut graph = oxrdf::Graph::new();
        for t in triples {
            graph.insert(t);
        }
        let mut inferred = Vec::new();
        rule.apply(&graph, &mut inferred);
        let mut result = oxrdf::Graph::new();
        for t in &inferred {
            result.insert(t);
        }
        result
    }

    #[test]
    fn profile_names_round_trip() {
        for profile in Profile::ALL {
            assert_eq!(Profile::from_name(profile.name()), Some(profile));
        }
        assert_eq!(Profile::from_name("owl-fb"), None);
    }

    #[test]
    fn profiles_are_nested() {
        for rule in Profile::Trans.rules() {
            assert!(Profile::Rdfs.rules().contains(rule), "{}", rule.name());
        }
        for rule in Profile::Rdfs.rules() {
            assert!(Profile::OwlRl.rules().contains(rule), "{}", rule.name());
        }
    }

    #[test]
    fn cax_sco() {
        let result = conclusions(
            Rule::CaxSco,
            &[
                Triple::new(ex("Dog"), rdfs::SUB_CLASS_OF, ex("Animal")),
                Triple::new(ex("Rex"), rdf::TYPE, ex("Dog")),
            ],
        );
        assert_eq!(result.len(), 1);
        assert!(result.contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Animal"))));
    }

    #[test]
    fn scm_sco_only_emits_new_triples() {
        let result = conclusions(
            Rule::ScmSco,
            &[
                Triple::new(ex("A"), rdfs::SUB_CLASS_OF, ex("B")),
                Triple::new(ex("B"), rdfs::SUB_CLASS_OF, ex("C")),
                Triple::new(ex("A"), rdfs::SUB_CLASS_OF, ex("C")),
            ],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn prp_rng_skips_literals() {
        let result = conclusions(
            Rule::PrpRng,
            &[
                Triple::new(ex("name"), rdfs::RANGE, ex("Name")),
                Triple::new(ex("Rex"), ex("name"), oxrdf::Literal::new_simple_literal("Rex")),
                Triple::new(ex("Rex"), ex("name"), ex("RexName")),
            ],
        );
        assert_eq!(result.len(), 1);
        assert!(result.contains(&Triple::new(ex("RexName"), rdf::TYPE, ex("Name"))));
    }

    #[test]
    fn prp_inv() {
        let input = [
            Triple::new(ex("hasParent"), owl::INVERSE_OF, ex("hasChild")),
            Triple::new(ex("Rex"), ex("hasParent"), ex("Max")),
            Triple::new(ex("Max"), ex("hasChild"), ex("Bella")),
        ];
        let first = conclusions(Rule::PrpInv1, &input);
        assert_eq!(first.len(), 1);
        assert!(first.contains(&Triple::new(ex("Max"), ex("hasChild"), ex("Rex"))));
        let second = conclusions(Rule::PrpInv2, &input);
        assert_eq!(second.len(), 1);
        assert!(second.contains(&Triple::new(ex("Bella"), ex("hasParent"), ex("Max"))));
    }

    #[test]
    fn prp_symp() {
        let result = conclusions(
            Rule::PrpSymp,
            &[
                Triple::new(ex("knows"), rdf::TYPE, owl::SYMMETRIC_PROPERTY),
                Triple::new(ex("Rex"), ex("knows"), ex("Max")),
            ],
        );
        assert_eq!(result.len(), 1);
        assert!(result.contains(&Triple::new(ex("Max"), ex("knows"), ex("Rex"))));
    }
}
