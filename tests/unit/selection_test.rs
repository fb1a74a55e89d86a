//! Unit tests for prompt handling, stock selection and object keys

use food_image_gateway::backend::stock::{prompt_hash, select_index};
use food_image_gateway::prompt::{self, DEFAULT_PROMPT};
use food_image_gateway::response::base64;
use food_image_gateway::storage::{object_key, MAX_STEM_LEN};

#[test]
fn test_pizza_resolves_to_fixed_index() {
    let pool = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let index = select_index("pizza", pool.len()).unwrap();

    assert_eq!(index, 0);
    assert_eq!(pool[index], "A");
}

#[test]
fn test_selection_is_stable_across_calls() {
    for prompt in ["pizza", "pão de queijo", "🍣 omakase", DEFAULT_PROMPT] {
        let first = select_index(prompt, 8);
        for _ in 0..10 {
            assert_eq!(select_index(prompt, 8), first);
        }
    }
}

#[test]
fn test_hash_counts_utf16_units() {
    // One astral character is two UTF-16 units: 0xD83C, 0xDF63.
    assert_eq!(prompt_hash("🍣"), 0xD83C * 31 + 0xDF63);
}

#[test]
fn test_default_prompt_substituted() {
    assert_eq!(prompt::resolve(None), DEFAULT_PROMPT);
    assert_eq!(prompt::resolve(Some("")), DEFAULT_PROMPT);
}

#[test]
fn test_inline_data_decodes_exactly() {
    assert_eq!(base64::decode("aGVsbG8=").unwrap(), b"hello".to_vec());
}

#[test]
fn test_latte_object_key() {
    let key = object_key("Café com Leite!", 1_718_000_000_123);

    assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    let (stem, timestamp) = key.rsplit_once('_').unwrap();
    assert!(stem.chars().count() <= MAX_STEM_LEN);
    assert_eq!(stem, "Caf__com_Leite_");
    assert_eq!(timestamp, "1718000000123");
}
