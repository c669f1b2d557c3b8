//! Provides ready to use [`NamedNodeRef`]s for the OWL terms the reasoner and the import resolver rely on.
//!
//! The RDF and RDFS terms are taken from [`oxrdf::vocab`].

pub mod owl {
    //! [OWL 2](https://www.w3.org/TR/owl2-overview/) vocabulary.
    use oxrdf::NamedNodeRef;

    /// The OWL namespace.
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
    /// The property that determines that two given classes are equivalent.
    pub const EQUIVALENT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#equivalentClass");
    /// The property that determines that two given properties are equivalent.
    pub const EQUIVALENT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#equivalentProperty");
    /// The property that is used for importing other ontologies into a given ontology.
    pub const IMPORTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#imports");
    /// The property that determines that two given properties are inverse.
    pub const INVERSE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#inverseOf");
    /// The class of ontologies.
    pub const ONTOLOGY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
    /// The property that determines that two given individuals are equal.
    pub const SAME_AS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#sameAs");
    /// The class of symmetric properties.
    pub const SYMMETRIC_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#SymmetricProperty");
    /// The class of transitive properties.
    pub const TRANSITIVE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#TransitiveProperty");
}
