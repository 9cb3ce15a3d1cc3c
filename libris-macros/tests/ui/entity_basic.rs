use libris_domain::entity::Entity;
use libris_domain::value_object::Version;
use libris_macros::{entity, entity_id};

#[entity_id]
struct ShelfId(String);

#[entity(id = ShelfId)]
struct Shelf {
    label: String,
}

#[entity(debug = false)]
struct Draft {
    body: String,
}

impl std::fmt::Debug for Draft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Draft(..)")
    }
}

fn main() {
    let shelf = Shelf {
        id: ShelfId::new("s-1".to_string()),
        version: Version::new(),
        label: "Fantasy".to_string(),
    };
    assert_eq!(shelf.id().to_string(), "s-1");
    assert!(shelf.version().is_new());
    let _ = format!("{:?}", shelf.clone());
    let _ = shelf.label;

    // 未指定 id 类型时默认为 String
    let draft = Draft {
        id: "d-1".to_string(),
        version: Version::new(),
        body: String::new(),
    };
    let _: &String = draft.id();
    let _ = format!("{:?}", draft);
    let _ = draft.body;
}
