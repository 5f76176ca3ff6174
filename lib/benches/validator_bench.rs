#![feature(test)]

extern crate test;

use rs_word_scramble::*;

use test::Bencher;

#[bench]
fn bench_evaluate_accepted(b: &mut Bencher) {
    let dictionary = WordListDictionary::from_iterator(["silk", "worm", "milk", "work"]);
    let used: Vec<String> = vec!["worm".to_string(), "milk".to_string()];

    b.iter(|| evaluate("silk", "silkworm", &used, &dictionary));
}

#[bench]
fn bench_evaluate_not_possible(b: &mut Bencher) {
    let dictionary = WordListDictionary::default();

    b.iter(|| evaluate::<String, _>("silkwormx", "silkworm", &[], &dictionary));
}

#[bench]
fn bench_letter_counts_can_spell(b: &mut Bencher) {
    let counts = LetterCounts::new("abstemiously");

    b.iter(|| counts.can_spell("mostly"));
}
