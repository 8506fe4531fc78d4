#![no_main]

use ferrous_injector::{DiError, Factory, Injector, Token};
use libfuzzer_sys::fuzz_target;

const TOKENS: u8 = 8;
const LEVELS: usize = 4;

fn token(byte: u8) -> Token {
    Token::from(format!("t{}", byte % TOKENS))
}

fuzz_target!(|data: &[u8]| {
    let mut chain = vec![Injector::builder().root().max_depth(64).build()];
    for _ in 1..LEVELS {
        let child = chain[chain.len() - 1].spawn();
        chain.push(child);
    }

    // Each op is three bytes: opcode, level, operand
    for op in data.chunks_exact(3) {
        let injector = &chain[op[1] as usize % LEVELS];
        match op[0] % 4 {
            0 => {
                let _ = injector.bind_constant(token(op[2]), op[2] as u64);
            }
            1 => {
                // Sums its dependencies, which may well form a cycle
                let deps = [token(op[2]), token(op[2] >> 3)];
                let factory = Factory::new(|args| {
                    let mut total = 0u64;
                    for i in 0..args.len() {
                        total = total.wrapping_add(*args.get::<u64>(i)?);
                    }
                    Ok(total)
                })
                .with_manifest(deps);
                let _ = injector.bind_factory(token(op[2] >> 1), factory, op[2] & 1 == 1);
            }
            2 => match injector.get::<u64>(token(op[2])) {
                Ok(_)
                | Err(DiError::Unresolved(_))
                | Err(DiError::Circular(_))
                | Err(DiError::DepthExceeded(_)) => {}
                Err(other) => panic!("unexpected error: {}", other),
            },
            _ => {
                let t = token(op[2]);
                // resolvable means some level on the way to the root binds it
                assert_eq!(
                    injector.is_resolvable(&t),
                    injector.ancestry().any(|level| level.contains(&t))
                );
            }
        }
    }
});
