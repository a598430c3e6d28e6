use crate::facet::{Facet, ValueClass};

/// A run of adjacent facets sharing one value class.
#[derive(Debug, Clone)]
pub struct FacetGroup<'a> {
    pub class: ValueClass,
    pub facets: Vec<&'a Facet>,
    /// A neutral singleton wedged between two different classes is sealed so
    /// that the following facet starts a new group.
    sealed: bool,
}

impl<'a> FacetGroup<'a> {
    fn open(class: ValueClass, facet: &'a Facet) -> Self {
        Self {
            class,
            facets: vec![facet],
            sealed: false,
        }
    }

    fn sealed(facet: &'a Facet) -> Self {
        Self {
            class: ValueClass::Neutral,
            facets: vec![facet],
            sealed: true,
        }
    }

    /// Digit rules only make sense when every position is a number.
    pub fn is_pure_digits(&self) -> bool {
        self.facets.iter().all(|f| f.class() == ValueClass::Digit)
    }

    fn accepts(&self, class: ValueClass) -> bool {
        !self.sealed && (self.class == class || self.class == ValueClass::Neutral)
    }
}

/// Split facets into groups of adjacent same-class facets.
///
/// Neutral facets (spaces, literals) join the group they sit in. A neutral
/// facet followed by a different class than the current group's becomes a
/// singleton group of its own.
pub fn group_facets(facets: &[Facet]) -> Vec<FacetGroup<'_>> {
    let mut groups: Vec<FacetGroup<'_>> = Vec::new();

    for (i, facet) in facets.iter().enumerate() {
        let class = facet.class();
        let Some(current) = groups.last_mut() else {
            groups.push(FacetGroup::open(class, facet));
            continue;
        };

        if class == ValueClass::Neutral {
            let next = next_classed(&facets[i + 1..]);
            let joins = !current.sealed
                && (current.class == ValueClass::Neutral
                    || next.map_or(true, |n| n == current.class));
            if joins {
                current.facets.push(facet);
            } else {
                groups.push(FacetGroup::sealed(facet));
            }
        } else if current.accepts(class) {
            current.class = class;
            current.facets.push(facet);
        } else {
            groups.push(FacetGroup::open(class, facet));
        }
    }

    groups
}

fn next_classed(facets: &[Facet]) -> Option<ValueClass> {
    facets
        .iter()
        .map(Facet::class)
        .find(|c| *c != ValueClass::Neutral)
}
