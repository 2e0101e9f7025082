//! Widget flow example
//!
//! Demonstrates the host round-trip: proposals arrive through the change
//! callback, the host applies them, derived state follows.

use jsonpad_core::{JsonEditor, Selection};
use std::sync::mpsc;

fn main() {
    let mut editor = JsonEditor::new("{\"scene\":\"intro\",\"shots\":[1,2,3]}");

    let (tx, rx) = mpsc::channel();
    editor.subscribe(move |change| {
        let _ = tx.send(change.clone());
    });

    println!("1. Initial validity: {}", editor.validity().is_valid);

    println!("\n2. Pretty-print:");
    editor.format();
    while let Ok(change) = rx.try_recv() {
        println!("  proposal from {:?}:\n{}", change.source, change.text);
        editor.set_value(&change.text);
    }
    println!("  lines after apply: {}", editor.line_count());

    println!("\n3. Search session:");
    editor.open_search();
    editor.set_query("s");
    let (current, total) = editor.match_counter().unwrap();
    println!("  match {current} of {total}");
    if let Some(offset) = editor.next_match() {
        let line = editor.line_index().line_for_char_offset(offset) + 1;
        println!("  next match at offset {offset} (line {line})");
    }

    println!("\n4. Tab indent at the caret:");
    if let Some(caret) = editor.insert_indent(Selection::caret(1)) {
        while let Ok(change) = rx.try_recv() {
            editor.set_value(&change.text);
        }
        println!("  caret now at {caret}");
    }

    println!("\n5. Broken edit surfaces a parse error:");
    editor.edit("{\"scene\":".to_string());
    while let Ok(change) = rx.try_recv() {
        editor.set_value(&change.text);
    }
    println!(
        "  valid: {} ({})",
        editor.validity().is_valid,
        editor.validity().message.as_deref().unwrap_or("-")
    );
}
