mod decoder;
mod encoder;
mod value;

use crate::Result;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use value::Value;

pub fn from_bytes<B>(input: &B) -> Result<Value>
where
    B: AsRef<[u8]> + ?Sized,
{
    Decoder::new(input.as_ref()).decode()
}

pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    let mut buf = vec![];
    Encoder::new(&mut buf).encode(value)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_values() -> Vec<Value> {
        vec![
            Value::Integer(0),
            Value::Integer(-731),
            Value::Bytes(vec![]),
            Value::from("hello world"),
            Value::from(vec![0u8, 255, 17]),
            Value::List(vec![Value::Integer(1), Value::from("foo")]),
            Value::List(vec![Value::List(vec![Value::from("nested")])]),
            [
                ("announce", Value::from("udp://tracker.example/announce")),
                (
                    "info",
                    [
                        ("length", Value::Integer(12345)),
                        ("name", Value::from("file.bin")),
                    ]
                    .into_iter()
                    .collect(),
                ),
            ]
            .into_iter()
            .collect(),
        ]
    }

    #[test]
    fn round_trip() {
        for v in sample_values() {
            let encoded = to_bytes(&v).unwrap();
            let decoded = from_bytes(&encoded).unwrap();
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn encode_known_forms() {
        assert_eq!(to_bytes(&Value::Integer(42)).unwrap(), b"i42e");
        assert_eq!(to_bytes(&Value::from("spam")).unwrap(), b"4:spam");
        assert_eq!(
            to_bytes(&Value::List(vec![Value::from("a"), Value::Integer(1)])).unwrap(),
            b"l1:ai1ee"
        );
    }

    #[test]
    fn canonical_key_order() {
        // insertion order must not matter, output keys are byte-sorted
        let mut forward = BTreeMap::new();
        forward.insert(b"alpha".to_vec(), Value::Integer(1));
        forward.insert(b"beta".to_vec(), Value::Integer(2));
        forward.insert(b"zz".to_vec(), Value::Integer(3));

        let mut reverse = BTreeMap::new();
        reverse.insert(b"zz".to_vec(), Value::Integer(3));
        reverse.insert(b"beta".to_vec(), Value::Integer(2));
        reverse.insert(b"alpha".to_vec(), Value::Integer(1));

        let a = to_bytes(&Value::Dictionary(forward)).unwrap();
        let b = to_bytes(&Value::Dictionary(reverse)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, b"d5:alphai1e4:betai2e2:zzi3ee");
    }
}
