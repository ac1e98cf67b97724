use super::Value;
use crate::error::{CalcError, CalcResult};
use crate::kind::Kind;
use crate::lattice;

/// An ordered sequence of values sharing one declared element kind.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    kind: Kind,
    items: Vec<Value>,
}

impl List {
    /// Build a list, widening every element to the widest kind present.
    ///
    /// An empty list declares Integer elements. Elements with no common kind
    /// are a type mismatch. Integers in a Rational list stay Integer, since
    /// a Rational with denominator 1 is always stored reduced.
    pub fn new(items: Vec<Value>, digits: u32) -> CalcResult<Self> {
        let Some(first) = items.first() else {
            return Ok(Self::empty());
        };
        let mut kind = first.kind();
        for item in &items[1..] {
            kind = lattice::common_kind(kind, item.kind()).ok_or_else(|| {
                CalcError::mismatch("list", format!("{} and {}", kind, item.kind()))
            })?;
        }
        let items = items
            .into_iter()
            .map(|v| match (kind, v.kind()) {
                (Kind::Rational, Kind::Integer) => Ok(v),
                _ => lattice::widen(v, kind, digits),
            })
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(Self { kind, items })
    }

    /// Assemble a list whose elements already share `kind`.
    pub(crate) fn from_parts(kind: Kind, items: Vec<Value>) -> Self {
        Self { kind, items }
    }

    pub fn empty() -> Self {
        Self {
            kind: Kind::Integer,
            items: Vec::new(),
        }
    }

    pub fn element_kind(&self) -> Kind {
        self.kind
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply `f` to every element and rebuild the list from the results.
    pub fn map(
        &self,
        digits: u32,
        mut f: impl FnMut(&Value) -> CalcResult<Value>,
    ) -> CalcResult<List> {
        let items = self.items.iter().map(&mut f).collect::<CalcResult<Vec<_>>>()?;
        List::new(items, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_to_widest_kind() {
        let list = List::new(
            vec![Value::integer(1), Value::rational(1, 2).unwrap()],
            16,
        )
        .unwrap();
        assert_eq!(list.element_kind(), Kind::Rational);
        assert_eq!(list.items()[0], Value::integer(1));

        let list = List::new(
            vec![Value::integer(1), Value::float("2.5", 16).unwrap()],
            16,
        )
        .unwrap();
        assert_eq!(list.element_kind(), Kind::Float);
        assert!(list.items().iter().all(|v| v.kind() == Kind::Float));
    }

    #[test]
    fn empty_list_is_integer() {
        let list = List::new(Vec::new(), 16).unwrap();
        assert_eq!(list.element_kind(), Kind::Integer);
        assert!(list.is_empty());
    }

    #[test]
    fn incompatible_elements_are_rejected() {
        let time = Value::Time(crate::value::Time::duration_from_nanos(5));
        let err = List::new(vec![Value::integer(1), time], 16).unwrap_err();
        assert!(matches!(err, CalcError::TypeMismatch { .. }));
    }
}
