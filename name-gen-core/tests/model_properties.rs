use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use name_gen_core::Error;
use name_gen_core::model::gender::Gender;
use name_gen_core::model::generation_input::GenerationInput;
use name_gen_core::model::generator::NameGenerator;
use name_gen_core::model::markov_model::MarkovModel;
use name_gen_core::model::name_source::{FileNameSource, MemoryNameSource};
use name_gen_core::model::symbol::{Context, Symbol};
use name_gen_core::model::transition_table::{accumulate, build, normalize, PARALLEL_THRESHOLD};

const GIRLS: [&str; 20] = [
	"emma", "olivia", "ava", "isabella", "sophia", "mia", "charlotte", "amelia", "harper", "evelyn",
	"abigail", "emily", "elizabeth", "mila", "ella", "avery", "sofia", "camila", "aria", "scarlett",
];

/// Deterministic synthetic corpus large enough to take the threaded path.
fn large_corpus() -> Vec<String> {
	let syllables = ["ka", "lo", "mi", "ra", "ne", "to", "su", "vi", "el", "an"];
	(0..PARALLEL_THRESHOLD + 500)
		.map(|i| {
			let mut name = String::new();
			let mut n = i;
			for _ in 0..(2 + i % 3) {
				name.push_str(syllables[n % syllables.len()]);
				n /= syllables.len();
			}
			name
		})
		.collect()
}

#[test]
fn every_distribution_sums_to_one() {
	for order in 1..=5 {
		let table = build(&GIRLS, order).unwrap();
		assert!(!table.is_empty());
		for (context, distribution) in table.iter() {
			assert!(
				(distribution.sum() - 1.0).abs() < 1e-4,
				"order {order}, context '{context}' sums to {}",
				distribution.sum()
			);
			assert!(distribution.iter().all(|(_, p)| p > 0.0 && p <= 1.0));
		}
	}
}

#[test]
fn contexts_respect_order() {
	let order = 3;
	let table = build(&GIRLS, order).unwrap();
	for (context, _) in table.iter() {
		assert!((1..=order).contains(&context.len()), "bad context '{context}'");
		let boundaries = context.symbols().iter().filter(|s| s.is_boundary()).count();
		if context.len() < order {
			assert_eq!(context.symbols()[0], Symbol::Boundary, "short context '{context}'");
		}
		assert!(boundaries <= 1);
		assert!(context.symbols()[1..].iter().all(|s| !s.is_boundary()));
	}
}

#[test]
fn building_is_deterministic() {
	for order in 1..=4 {
		assert_eq!(build(&GIRLS, order).unwrap(), build(&GIRLS, order).unwrap());
	}
}

#[test]
fn threaded_counting_matches_sequential_counting() {
	let corpus = large_corpus();
	let order = 3;

	let threaded = accumulate(&corpus, order).unwrap();

	let (head, tail) = corpus.split_at(PARALLEL_THRESHOLD / 2);
	let mut sequential = accumulate(head, order).unwrap();
	sequential.merge(&accumulate(tail, order).unwrap()).unwrap();

	assert_eq!(threaded, sequential);
	assert_eq!(normalize(&threaded), normalize(&sequential));
}

#[test]
fn bob_scenario_table() {
	let table = build(&["bob"], 2).unwrap();
	let next = |context: &str, symbol: Symbol| table.get(&Context::parse(context)).unwrap().probability(symbol);

	assert_eq!(next("_b", Symbol::Char('o')), 1.0);
	assert_eq!(next("bo", Symbol::Char('b')), 1.0);
	assert_eq!(next("ob", Symbol::Boundary), 1.0);
}

#[test]
fn generated_names_satisfy_all_constraints() {
	let table = build(&GIRLS, 2).unwrap();
	let generator = NameGenerator::new(table, GIRLS);
	let mut rng = StdRng::seed_from_u64(2024);

	for (min, max) in [(1, 12), (3, 6), (5, 5), (0, 4)] {
		let input = GenerationInput::new(min, max);
		for _ in 0..100 {
			let name = generator.generate(&input, &mut rng).unwrap();
			let length = name.chars().count();
			assert!((min..=max).contains(&length), "'{name}' not in {min}..={max}");

			let lower = name.to_lowercase();
			assert!(!GIRLS.contains(&lower.as_str()), "'{name}' copies the corpus");

			if let Some(first) = name.chars().next() {
				assert!(first.is_uppercase(), "'{name}' is not capitalized");
				assert!(name.chars().skip(1).all(|c| !c.is_uppercase()));
			}
		}
	}
}

#[test]
fn impossible_ranges_return_empty_without_sampling() {
	// An unbounded input would hang if sampling happened on the single-name model
	let table = build(&["bob"], 2).unwrap();
	let generator = NameGenerator::new(table, ["bob"]);
	let mut rng = StdRng::seed_from_u64(0);

	for input in [GenerationInput::new(0, 0), GenerationInput::new(3, 0), GenerationInput::new(4, 3)] {
		assert_eq!(generator.generate(&input.unbounded(), &mut rng).unwrap(), "");
	}
}

#[test]
fn unreachable_min_length_exhausts_retries() {
	let table = build(&GIRLS, 3).unwrap();
	let generator = NameGenerator::new(table, GIRLS);
	let mut rng = StdRng::seed_from_u64(5);
	let input = GenerationInput::new(40, 50).with_max_attempts(200);

	assert!(matches!(
		generator.generate(&input, &mut rng),
		Err(Error::RetryExhausted { attempts: 200 })
	));
}

#[test]
fn file_source_end_to_end() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("female.txt"), GIRLS.join("\n").to_uppercase()).unwrap();

	let source = FileNameSource::new(dir.path());
	assert_eq!(source.available().unwrap(), vec![Gender::Female]);

	let mut model = MarkovModel::with_seed(&source, Gender::Female, 2, 77).unwrap();
	assert_eq!(model.corpus_len(), GIRLS.len());

	let names = model.generate_names(&GenerationInput::new(3, 9), 25).unwrap();
	for name in &names {
		assert!(!GIRLS.contains(&name.to_lowercase().as_str()));
	}
}

#[test]
fn reseed_keeps_the_table() {
	let source = MemoryNameSource::new().with_names(Gender::Female, GIRLS);
	let mut model = MarkovModel::with_seed(&source, Gender::Female, 2, 1).unwrap();
	let before = model.table().clone();

	model.reseed();
	model.generate_name(&GenerationInput::new(2, 10)).unwrap();
	model.reseed_from(3);

	assert_eq!(model.table(), &before);
}
