use ox_form_builder::schema::FieldType;
use ox_form_builder::session::Notification;

fn main() -> anyhow::Result<()> {
    // 1. Session over the built-in field-type table
    let mut session = ox_form_builder::standard_session()?;

    // 2. Build a small tree: a text root with a nested date field
    let root = session
        .add_root_field(Some(FieldType::Text))
        .expect("a type was supplied");
    let child = session.add_nested_field(root).expect("root exists");
    session.retype_field(child, FieldType::Date);

    // 3. First submission attempt fails: nothing has a value yet
    println!("--- Submitting empty form ---");
    for notification in session.submit() {
        match notification {
            Notification::Error(msg) => println!("error: {}", msg),
            Notification::Success(msg) => println!("ok: {}", msg),
        }
    }

    // 4. Fill the fields and submit again
    session.change_value(root, "Jane Doe");
    session.change_value(child, "2024-01-05");

    println!("--- Submitting filled form ---");
    for notification in session.submit() {
        match notification {
            Notification::Error(msg) => println!("error: {}", msg),
            Notification::Success(msg) => println!("ok: {}", msg),
        }
    }

    let snapshot = session.submitted_data().expect("submission committed");
    println!("--- Submitted Data ---");
    for entry in snapshot.values() {
        println!("{}", serde_json::to_string_pretty(entry)?);
    }

    if snapshot.get(&root).map(|entry| entry.value.as_str()) == Some("Jane Doe") {
        println!("VERIFICATION PASSED");
    } else {
        println!("VERIFICATION FAILED: snapshot missing expected value.");
        std::process::exit(1);
    }

    Ok(())
}
