//! Basic Chunking
//!
//! The minimal example: chunk a chaptered document.
//!
//! ```bash
//! cargo run --example basic_chunking
//! ```

use cleave::chunk;

fn main() {
    let document = "\u{3000}\u{3000}这是一本小说的序言，交代了故事的背景。\n\n\
        第一章 初遇\n\n\
        \u{3000}\u{3000}那天下着小雨。她撑着一把红伞，从街角走过来。\
        他愣住了，手里的书掉在了地上！她笑了笑，弯腰替他捡起来。\n\n\
        第二章 重逢\n\n\
        \u{3000}\u{3000}三年后，他们在另一座城市再次相遇。你还记得我吗？她问。";

    println!("Document: {} chars", document.chars().count());

    for c in chunk(document, 30) {
        let chapter = c.chapter.as_deref().unwrap_or("-");
        println!("[{}] ({chapter}) {} chars: \"{}\"", c.index, c.char_count(), c.text);
    }

    // Every chapter heading opens a fresh chunk, and no sentence is cut.
}
