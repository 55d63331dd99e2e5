//! Java names: simple identifiers, dotted package/qualified names and the
//! canonical name of a type declaration.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// A single Java identifier (`Foo`, `x`, `compareTo`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(SmolStr::new(text.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name(SmolStr::from(value))
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A package name such as `java.util`. The default (unnamed) package has no
/// segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName {
    segments: Vec<Name>,
}

impl PackageName {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_dotted(dotted: &str) -> Self {
        Self {
            segments: split_dotted(dotted),
        }
    }

    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn to_dotted(&self) -> String {
        join_dotted(&self.segments)
    }

    /// Qualify `name` with this package (`java.lang` + `Object` -> `java.lang.Object`).
    pub fn qualify(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}.{name}", self.to_dotted())
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

/// A possibly-qualified name as written in source (`Map.Entry`, `java.util.List`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    segments: Vec<Name>,
}

impl QualifiedName {
    pub fn from_dotted(dotted: &str) -> Self {
        Self {
            segments: split_dotted(dotted),
        }
    }

    pub fn from_segments(segments: Vec<Name>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn last(&self) -> Option<&Name> {
        self.segments.last()
    }

    pub fn to_dotted(&self) -> String {
        join_dotted(&self.segments)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

/// The canonical, dotted name of a type declaration (`com.example.Outer.Inner`).
///
/// Unique within a resolution session.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(SmolStr);

impl TypeName {
    pub fn new(dotted: impl AsRef<str>) -> Self {
        Self(SmolStr::new(dotted.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The last segment of the dotted name.
    pub fn simple_name(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((_, simple)) => simple,
            None => self.as_str(),
        }
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

fn split_dotted(dotted: &str) -> Vec<Name> {
    dotted
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(Name::from)
        .collect()
}

fn join_dotted(segments: &[Name]) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push('.');
        }
        out.push_str(segment.as_str());
    }
    out
}
