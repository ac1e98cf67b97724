use std::fmt;

/// The closed set of value kinds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Integer,
    Rational,
    Float,
    Complex,
    Matrix,
    List,
    Time,
    Symbolic,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::Integer,
        Kind::Rational,
        Kind::Float,
        Kind::Complex,
        Kind::Matrix,
        Kind::List,
        Kind::Time,
        Kind::Symbolic,
    ];

    /// Position in the scalar promotion order, or `None` for kinds outside it.
    pub fn scalar_rank(self) -> Option<u8> {
        match self {
            Kind::Integer => Some(0),
            Kind::Rational => Some(1),
            Kind::Float => Some(2),
            Kind::Complex => Some(3),
            _ => None,
        }
    }

    pub fn is_scalar(self) -> bool {
        self.scalar_rank().is_some()
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Kind::Integer | Kind::Rational)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Rational => "rational",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Matrix => "matrix",
            Kind::List => "list",
            Kind::Time => "time",
            Kind::Symbolic => "symbolic",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of kinds, used by operations to declare what they accept.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u16);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);
    pub const INTEGER: KindSet = KindSet::of(Kind::Integer);
    pub const RATIONAL: KindSet = KindSet::of(Kind::Rational);
    pub const FLOAT: KindSet = KindSet::of(Kind::Float);
    pub const COMPLEX: KindSet = KindSet::of(Kind::Complex);
    pub const MATRIX: KindSet = KindSet::of(Kind::Matrix);
    pub const LIST: KindSet = KindSet::of(Kind::List);
    pub const TIME: KindSet = KindSet::of(Kind::Time);
    pub const SYMBOLIC: KindSet = KindSet::of(Kind::Symbolic);

    /// Integer and Rational.
    pub const EXACT: KindSet = KindSet::INTEGER.union(KindSet::RATIONAL);
    /// Integer, Rational and Float: the totally ordered scalars.
    pub const REAL: KindSet = KindSet::EXACT.union(KindSet::FLOAT);
    /// Every scalar kind.
    pub const SCALAR: KindSet = KindSet::REAL.union(KindSet::COMPLEX);
    pub const ANY: KindSet = KindSet(0xFF);

    pub const fn of(kind: Kind) -> KindSet {
        KindSet(kind.bit())
    }

    pub const fn union(self, other: KindSet) -> KindSet {
        KindSet(self.0 | other.0)
    }

    pub const fn contains(self, kind: Kind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Kind> {
        Kind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
