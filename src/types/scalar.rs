//! # ScalarArray - Zero-Rank Array over One Value
//!
//! A `ScalarArray` presents a single opaque value through the array contract:
//! rank 0, one element, and accessors that ignore whatever coordinate they
//! are handed. Conversions go through [`Value`]'s narrowing rules, so a
//! semantically invalid request (Bool to Float64, Char to a numeric) fails
//! with a forbidden-conversion error rather than producing a bit pattern.

use eyre::Result;

use crate::index::Shape;
use crate::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarArray {
    value: Value<'static>,
}

impl ScalarArray {
    pub fn new(value: Value<'static>) -> Self {
        Self { value }
    }

    pub fn shape(&self) -> Shape {
        Shape::scalar()
    }

    pub fn value(&self) -> &Value<'static> {
        &self.value
    }

    /// The wrapped value; the coordinate is ignored, a rank-0 array has
    /// exactly one element wherever it is addressed.
    pub fn get(&self, _coords: &[usize]) -> &Value<'static> {
        &self.value
    }

    pub fn get_f64(&self) -> Result<f64> {
        self.value.to_f64()
    }

    pub fn get_f32(&self) -> Result<f32> {
        self.value.to_f32()
    }

    pub fn get_i64(&self) -> Result<i64> {
        self.value.to_i64()
    }

    pub fn get_i32(&self) -> Result<i32> {
        self.value.to_i32()
    }

    pub fn get_i16(&self) -> Result<i16> {
        self.value.to_i16()
    }

    pub fn get_i8(&self) -> Result<i8> {
        self.value.to_i8()
    }

    pub fn get_bool(&self) -> Result<bool> {
        self.value.as_bool()
    }

    pub fn get_char(&self) -> Result<char> {
        self.value.as_char()
    }

    pub fn get_string(&self) -> Result<String> {
        Ok(self.value.as_str()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_array_has_rank_zero() {
        let a = ScalarArray::new(Value::Float64(3.5));
        assert_eq!(a.shape().rank(), 0);
        assert_eq!(a.shape().size(), 1);
    }

    #[test]
    fn index_argument_is_ignored() {
        let a = ScalarArray::new(Value::Int32(7));
        assert_eq!(a.get(&[]), a.get(&[99, 99]));
        assert_eq!(a.get(&[3]).to_i32().unwrap(), 7);
    }

    #[test]
    fn numeric_narrowing_applies() {
        let a = ScalarArray::new(Value::Float64(2.75));
        assert_eq!(a.get_f64().unwrap(), 2.75);
        assert_eq!(a.get_i32().unwrap(), 2);
    }

    #[test]
    fn forbidden_conversions_fail() {
        let a = ScalarArray::new(Value::Bool(true));
        let err = a.get_f64().unwrap_err();
        assert!(err.to_string().contains("forbidden conversion"));
        assert!(a.get_bool().unwrap());

        let c = ScalarArray::new(Value::Char('k'));
        assert!(c.get_f32().is_err());
        assert_eq!(c.get_char().unwrap(), 'k');
    }
}
