#![allow(unused_crate_dependencies)]

use proptest::prelude::*;
use strata_registry::{RegistryContext, TypeKey};

const NAME: &str = "types";

/// Registrations as raw key values, each preceded by a number of noise events.
fn arb_script() -> impl Strategy<Value = Vec<(u32, usize)>> {
	prop::collection::vec((0u32..12, 0usize..6), 0..20)
}

fn replay(script: &[(u32, usize)], with_noise: bool) -> Vec<Vec<TypeKey>> {
	let mut ctx = RegistryContext::new();
	ctx.declare(NAME).expect("declare");
	let mut reads = Vec::with_capacity(script.len());
	for &(raw, noise) in script {
		if with_noise {
			for _ in 0..noise {
				ctx.noise();
			}
		}
		ctx.register(NAME, TypeKey::from_u32(raw)).expect("register");
		if with_noise {
			for _ in 0..noise {
				ctx.noise();
			}
		}
		reads.push(ctx.read(NAME).as_slice().to_vec());
	}
	reads
}

proptest! {
	/// Reading after registration k yields exactly the first k keys, duplicates included.
	#[test]
	fn prop_order_preserved(script in arb_script()) {
		let reads = replay(&script, false);
		for (idx, read) in reads.iter().enumerate() {
			let expected: Vec<TypeKey> = script[..=idx]
				.iter()
				.map(|&(raw, _)| TypeKey::from_u32(raw))
				.collect();
			prop_assert_eq!(read, &expected);
		}
	}

	/// Interleaving noise events never changes any snapshot.
	#[test]
	fn prop_noise_invariance(script in arb_script()) {
		prop_assert_eq!(replay(&script, false), replay(&script, true));
	}

	/// A registry unrelated to the one being read does not leak into it.
	#[test]
	fn prop_foreign_registrations_are_noise(script in arb_script()) {
		let mut ctx = RegistryContext::new();
		ctx.declare(NAME).expect("declare");
		ctx.declare("other").expect("declare");
		for &(raw, noise) in &script {
			for _ in 0..noise {
				ctx.register("other", TypeKey::from_u32(raw)).expect("register other");
			}
			ctx.register(NAME, TypeKey::from_u32(raw)).expect("register");
		}
		let read = ctx.read(NAME);
		let expected: Vec<TypeKey> = script.iter().map(|&(raw, _)| TypeKey::from_u32(raw)).collect();
		prop_assert_eq!(read.as_slice(), expected.as_slice());
	}
}
