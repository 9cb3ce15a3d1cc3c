use libris_macros::entity_id;

#[entity_id]
struct MemberId(String);

#[entity_id(debug = false)]
struct CardId(String);

impl std::fmt::Debug for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardId(..)")
    }
}

fn main() {
    let id = MemberId::new("m-42".to_string());
    let _ = format!("{:?}", id);
    assert_eq!(id.to_string(), "m-42");

    let parsed: MemberId = "m-42".parse().unwrap();
    assert_eq!(parsed, id);

    let raw: String = id.into();
    assert_eq!(raw, "m-42");

    let card = CardId::from("c-1".to_string());
    let _ = format!("{:?}", card);
}
