//! Tagged field value storage.
//!
//! Simulation fields come in a small closed set of value types: integer and
//! double scalars, 2- and 3-component spatial vectors, and symmetric tensors
//! stored as their lower triangle plus diagonal (3 components in 2-D, 6 in
//! 3-D). [`FieldBuffer`] is a tagged union of typed vectors over that set;
//! every consumer matches on it exhaustively, so growing the set is a
//! compile-time event at each consumption site rather than a runtime
//! downcast failure.

use crate::mesh_error::MeshStateError;

/// Value-type tag of a field.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FieldTag {
    /// Integer scalar.
    Int,
    /// Double scalar.
    Double,
    /// 2-component spatial vector.
    Vector2,
    /// 3-component spatial vector.
    Vector3,
    /// Symmetric 2x2 tensor: lower triangle plus diagonal, 3 components.
    Tensor2,
    /// Symmetric 3x3 tensor: lower triangle plus diagonal, 6 components.
    Tensor3,
}

impl FieldTag {
    /// Stable string label for the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldTag::Int => "int",
            FieldTag::Double => "double",
            FieldTag::Vector2 => "vector2",
            FieldTag::Vector3 => "vector3",
            FieldTag::Tensor2 => "tensor2",
            FieldTag::Tensor3 => "tensor3",
        }
    }

    /// Number of scalar components per value.
    pub fn components(self) -> usize {
        match self {
            FieldTag::Int | FieldTag::Double => 1,
            FieldTag::Vector2 => 2,
            FieldTag::Vector3 | FieldTag::Tensor2 => 3,
            FieldTag::Tensor3 => 6,
        }
    }
}

/// Type-erased, tagged storage for one field's values.
///
/// `Vector3` and `Tensor2` share the `[f64; 3]` representation but remain
/// distinct tags; a tensor is not interchangeable with a vector even when the
/// component counts coincide.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldBuffer {
    /// Integer scalars.
    Int(Vec<i32>),
    /// Double scalars.
    Double(Vec<f64>),
    /// 2-component vectors.
    Vector2(Vec<[f64; 2]>),
    /// 3-component vectors.
    Vector3(Vec<[f64; 3]>),
    /// Symmetric 2x2 tensors (3 components each).
    Tensor2(Vec<[f64; 3]>),
    /// Symmetric 3x3 tensors (6 components each).
    Tensor3(Vec<[f64; 6]>),
}

impl FieldBuffer {
    /// Allocates a default-filled buffer of `len` values of the given tag.
    ///
    /// New slots carry the type's default value; callers are expected to
    /// populate them before use.
    pub fn with_len(tag: FieldTag, len: usize) -> Self {
        match tag {
            FieldTag::Int => FieldBuffer::Int(vec![0; len]),
            FieldTag::Double => FieldBuffer::Double(vec![0.0; len]),
            FieldTag::Vector2 => FieldBuffer::Vector2(vec![[0.0; 2]; len]),
            FieldTag::Vector3 => FieldBuffer::Vector3(vec![[0.0; 3]; len]),
            FieldTag::Tensor2 => FieldBuffer::Tensor2(vec![[0.0; 3]; len]),
            FieldTag::Tensor3 => FieldBuffer::Tensor3(vec![[0.0; 6]; len]),
        }
    }

    /// Value-type tag of this buffer.
    pub fn tag(&self) -> FieldTag {
        match self {
            FieldBuffer::Int(_) => FieldTag::Int,
            FieldBuffer::Double(_) => FieldTag::Double,
            FieldBuffer::Vector2(_) => FieldTag::Vector2,
            FieldBuffer::Vector3(_) => FieldTag::Vector3,
            FieldBuffer::Tensor2(_) => FieldTag::Tensor2,
            FieldBuffer::Tensor3(_) => FieldTag::Tensor3,
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        match self {
            FieldBuffer::Int(v) => v.len(),
            FieldBuffer::Double(v) => v.len(),
            FieldBuffer::Vector2(v) => v.len(),
            FieldBuffer::Vector3(v) => v.len(),
            FieldBuffer::Tensor2(v) => v.len(),
            FieldBuffer::Tensor3(v) => v.len(),
        }
    }

    /// Whether the buffer holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resizes to `len` values, default-filling any new slots.
    pub fn resize(&mut self, len: usize) {
        match self {
            FieldBuffer::Int(v) => v.resize(len, 0),
            FieldBuffer::Double(v) => v.resize(len, 0.0),
            FieldBuffer::Vector2(v) => v.resize(len, [0.0; 2]),
            FieldBuffer::Vector3(v) => v.resize(len, [0.0; 3]),
            FieldBuffer::Tensor2(v) => v.resize(len, [0.0; 3]),
            FieldBuffer::Tensor3(v) => v.resize(len, [0.0; 6]),
        }
    }

    /// Copies all values from `src`, checking tag and length.
    pub fn copy_from(&mut self, src: &FieldBuffer) -> Result<(), MeshStateError> {
        if self.tag() != src.tag() {
            return Err(MeshStateError::TagMismatch {
                expected: self.tag(),
                found: src.tag(),
            });
        }
        if self.len() != src.len() {
            return Err(MeshStateError::LengthMismatch {
                expected: self.len(),
                found: src.len(),
            });
        }
        match (self, src) {
            (FieldBuffer::Int(dst), FieldBuffer::Int(s)) => dst.copy_from_slice(s),
            (FieldBuffer::Double(dst), FieldBuffer::Double(s)) => dst.copy_from_slice(s),
            (FieldBuffer::Vector2(dst), FieldBuffer::Vector2(s)) => dst.copy_from_slice(s),
            (FieldBuffer::Vector3(dst), FieldBuffer::Vector3(s)) => dst.copy_from_slice(s),
            (FieldBuffer::Tensor2(dst), FieldBuffer::Tensor2(s)) => dst.copy_from_slice(s),
            (FieldBuffer::Tensor3(dst), FieldBuffer::Tensor3(s)) => dst.copy_from_slice(s),
            // Tags already matched above.
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Integer scalar view, if this is an `Int` buffer.
    pub fn as_int(&self) -> Option<&[i32]> {
        match self {
            FieldBuffer::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable integer scalar view.
    pub fn as_int_mut(&mut self) -> Option<&mut [i32]> {
        match self {
            FieldBuffer::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Double scalar view, if this is a `Double` buffer.
    pub fn as_double(&self) -> Option<&[f64]> {
        match self {
            FieldBuffer::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable double scalar view.
    pub fn as_double_mut(&mut self) -> Option<&mut [f64]> {
        match self {
            FieldBuffer::Double(v) => Some(v),
            _ => None,
        }
    }

    /// 2-vector view, if this is a `Vector2` buffer.
    pub fn as_vector2(&self) -> Option<&[[f64; 2]]> {
        match self {
            FieldBuffer::Vector2(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable 2-vector view.
    pub fn as_vector2_mut(&mut self) -> Option<&mut [[f64; 2]]> {
        match self {
            FieldBuffer::Vector2(v) => Some(v),
            _ => None,
        }
    }

    /// 3-vector view, if this is a `Vector3` buffer.
    pub fn as_vector3(&self) -> Option<&[[f64; 3]]> {
        match self {
            FieldBuffer::Vector3(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable 3-vector view.
    pub fn as_vector3_mut(&mut self) -> Option<&mut [[f64; 3]]> {
        match self {
            FieldBuffer::Vector3(v) => Some(v),
            _ => None,
        }
    }

    /// Symmetric 2x2 tensor view, if this is a `Tensor2` buffer.
    pub fn as_tensor2(&self) -> Option<&[[f64; 3]]> {
        match self {
            FieldBuffer::Tensor2(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable symmetric 2x2 tensor view.
    pub fn as_tensor2_mut(&mut self) -> Option<&mut [[f64; 3]]> {
        match self {
            FieldBuffer::Tensor2(v) => Some(v),
            _ => None,
        }
    }

    /// Symmetric 3x3 tensor view, if this is a `Tensor3` buffer.
    pub fn as_tensor3(&self) -> Option<&[[f64; 6]]> {
        match self {
            FieldBuffer::Tensor3(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable symmetric 3x3 tensor view.
    pub fn as_tensor3_mut(&mut self) -> Option<&mut [[f64; 6]]> {
        match self {
            FieldBuffer::Tensor3(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_matches_tag_and_len() {
        for tag in [
            FieldTag::Int,
            FieldTag::Double,
            FieldTag::Vector2,
            FieldTag::Vector3,
            FieldTag::Tensor2,
            FieldTag::Tensor3,
        ] {
            let buf = FieldBuffer::with_len(tag, 5);
            assert_eq!(buf.tag(), tag);
            assert_eq!(buf.len(), 5);
            assert!(!buf.is_empty());
        }
        assert!(FieldBuffer::with_len(FieldTag::Int, 0).is_empty());
    }

    #[test]
    fn resize_default_fills() {
        let mut buf = FieldBuffer::Double(vec![1.0, 2.0]);
        buf.resize(4);
        assert_eq!(buf.as_double().unwrap(), &[1.0, 2.0, 0.0, 0.0]);
        buf.resize(1);
        assert_eq!(buf.as_double().unwrap(), &[1.0]);
    }

    #[test]
    fn copy_from_checks_tag() {
        let mut dst = FieldBuffer::with_len(FieldTag::Double, 2);
        let src = FieldBuffer::Int(vec![1, 2]);
        assert_eq!(
            dst.copy_from(&src),
            Err(MeshStateError::TagMismatch {
                expected: FieldTag::Double,
                found: FieldTag::Int,
            })
        );
    }

    #[test]
    fn copy_from_checks_len() {
        let mut dst = FieldBuffer::with_len(FieldTag::Int, 2);
        let src = FieldBuffer::Int(vec![1, 2, 3]);
        assert_eq!(
            dst.copy_from(&src),
            Err(MeshStateError::LengthMismatch {
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn copy_from_copies_values() {
        let mut dst = FieldBuffer::with_len(FieldTag::Vector2, 2);
        let src = FieldBuffer::Vector2(vec![[1.0, 2.0], [3.0, 4.0]]);
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn vector3_and_tensor2_are_distinct_tags() {
        let v = FieldBuffer::Vector3(vec![[0.0; 3]]);
        let t = FieldBuffer::Tensor2(vec![[0.0; 3]]);
        assert_ne!(v.tag(), t.tag());
        assert!(v.as_tensor2().is_none());
        assert!(t.as_vector3().is_none());
        assert_eq!(v.tag().components(), t.tag().components());
    }

    #[test]
    fn tag_labels_are_stable() {
        assert_eq!(FieldTag::Int.as_str(), "int");
        assert_eq!(FieldTag::Tensor3.as_str(), "tensor3");
        assert_eq!(FieldTag::Tensor3.components(), 6);
    }
}
