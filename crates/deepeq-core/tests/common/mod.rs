use deepeq_core::{Record, Value};

/// Address record with a street and a city
#[allow(dead_code)]
pub fn address(street: &str, city: &str) -> Value {
    Record::builder("Address")
        .field("street", street)
        .field("city", city)
        .build_value()
}

/// Person record: name, age and a nested address
#[allow(dead_code)]
pub fn person(name: &str, age: i64, city: &str) -> Value {
    Record::builder("Person")
        .supertype("Entity")
        .field("name", name)
        .private_field("age", age)
        .field("address", address("1 Main St", city))
        .build_value()
}

/// Single node whose `next` field points back at itself
#[allow(dead_code)]
pub fn self_loop(name: &str) -> Value {
    let node = Record::builder("Node").field("name", name).build();
    node.set_field("next", Value::Record(node.clone()));
    Value::Record(node)
}

/// Two nodes pointing at each other: `a -> b -> a`
#[allow(dead_code)]
pub fn two_cycle(a: &str, b: &str) -> Value {
    let first = Record::builder("Node").field("name", a).build();
    let second = Record::builder("Node")
        .field("name", b)
        .field("next", Value::Record(first.clone()))
        .build();
    first.set_field("next", Value::Record(second));
    Value::Record(first)
}
