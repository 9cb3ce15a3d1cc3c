use libris_domain::entity::Entity;
use libris_domain::entity::private::Token;
use libris_domain::value_object::Version;
use libris_macros::entity;

#[entity]
struct Shelf {
    label: String,
}

fn main() {
    let mut shelf = Shelf {
        id: "s-1".to_string(),
        version: Version::new(),
        label: "Fantasy".to_string(),
    };
    let _ = shelf.advance_version(Token { _priv: () });
    let _ = shelf.label;
}
