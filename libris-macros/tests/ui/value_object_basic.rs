use libris_domain::value_object::ValueObject;
use libris_macros::value_object;

#[value_object]
struct Amount {
    value: i64,
}

#[value_object(default = false)]
struct Isbn(String);

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object(default = false, validate = true)]
struct Label(String);

impl ValueObject for Label {
    type Error = String;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.trim().is_empty() {
            return Err("label cannot be blank".to_string());
        }
        Ok(())
    }
}

#[value_object]
enum Format {
    #[default]
    Paperback,
    Hardcover,
}

fn main() {
    let _ = format!("{:?}", Amount { value: 0 });

    let a = Amount::default();
    let _eq = a.clone() == Amount { value: 0 };

    // default = false 时仍有 Clone/PartialEq
    let isbn = Isbn("0306406152".to_string());
    let _ = isbn.clone() == isbn;

    let _ = Opaque(1);

    // validate = true 时 TryFrom 与反序列化共用校验
    assert!(Label::try_from("shelf".to_string()).is_ok());
    assert_eq!(Label::try_from("  ".to_string()).unwrap_err(), "label cannot be blank");

    let _f: Format = Default::default();
    let _ = Format::Hardcover;
}
