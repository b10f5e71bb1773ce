// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Sealed messages through the full hide/reveal pipeline.

use phasm_text::{hide, reveal, CodecError, Codebook, CodingMethod, StegoError, TreeConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const CORPUS: &str = "\
the quick brown fox jumps over the lazy dog
the lazy dog sleeps in the sun
a quick brown cat runs over the fence
the cat sleeps on the mat
a dog runs in the park
the sun shines over the park
a fox hides in the brown grass
the dog and the cat play in the sun
";

fn book(depth: usize) -> Codebook {
    Codebook::from_corpus(CORPUS, &TreeConfig::new(depth, CodingMethod::Adaptive).unwrap()).unwrap()
}

#[test]
fn plain_message() {
    let book = book(2);
    let mut rng = ChaCha20Rng::seed_from_u64(100);
    let text = hide(&book, b"meet at the old bridge", None, &mut rng).unwrap();
    assert_eq!(reveal(&book, &text, None).unwrap(), b"meet at the old bridge");
}

#[test]
fn encrypted_message() {
    let book = book(3);
    let mut rng = ChaCha20Rng::seed_from_u64(101);
    let text = hide(&book, b"the eagle has landed", Some("hunter2"), &mut rng).unwrap();
    assert_eq!(
        reveal(&book, &text, Some("hunter2")).unwrap(),
        b"the eagle has landed"
    );
    assert!(matches!(
        reveal(&book, &text, Some("wrong")),
        Err(StegoError::DecryptionFailed)
    ));
    assert!(matches!(
        reveal(&book, &text, None),
        Err(StegoError::PassphraseRequired)
    ));
}

#[test]
fn compressible_message() {
    let book = book(2);
    let message = "all work and no play makes jack a dull boy ".repeat(20);
    let mut rng = ChaCha20Rng::seed_from_u64(102);
    let text = hide(&book, message.as_bytes(), None, &mut rng).unwrap();
    assert_eq!(reveal(&book, &text, None).unwrap(), message.as_bytes());
}

#[test]
fn wide_fan_out_is_exact() {
    let corpus: String = (0..2048).map(|i| format!("a w{i}\n")).collect();
    let book = Codebook::from_corpus(&corpus, &TreeConfig::default()).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(104);
    let text = hide(&book, b"eleven bit codes", Some("pw"), &mut rng).unwrap();
    assert_eq!(reveal(&book, &text, Some("pw")).unwrap(), b"eleven bit codes");
}

#[test]
fn uncoded_fixed_tree_reports_no_capacity() {
    let config = TreeConfig::new(3, CodingMethod::Fixed).unwrap();
    let book = Codebook::from_corpus("x y p\nx y q\n", &config).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(105);
    assert!(matches!(
        hide(&book, b"stuck", None, &mut rng),
        Err(StegoError::Codec(CodecError::NoCapacity))
    ));
}

#[test]
fn different_depth_does_not_reveal() {
    let mut rng = ChaCha20Rng::seed_from_u64(103);
    let text = hide(&book(3), b"depth matters", None, &mut rng).unwrap();
    // Either the covertext does not fit the depth-2 tree or the frame is garbage.
    if let Ok(message) = reveal(&book(2), &text, None) {
        assert_ne!(message, b"depth matters");
    }
}
