use twolevel::*;
use std::env;
use rand::prelude::*;

/// Width of the synthetic program counter.
const PC_BITS: usize = 32;

/// How a synthetic branch behaves.
#[derive(Clone, Copy, Debug)]
enum Behavior { 
    /// Taken `n - 1` times, then not-taken once
    Loop(usize),
    /// Taken with some fixed probability
    Biased(f64),
    /// Alternates between taken and not-taken
    Alternating,
}

struct SyntheticBranch { 
    pc: u64,
    behavior: Behavior,
    occ: usize,
}
impl SyntheticBranch {
    fn next_outcome(&mut self, rng: &mut StdRng) -> Outcome {
        let occ = self.occ;
        self.occ += 1;
        match self.behavior { 
            Behavior::Loop(n) => Outcome::from((occ + 1) % n != 0),
            Behavior::Biased(p) => Outcome::from(rng.gen_bool(p)),
            Behavior::Alternating => Outcome::from(occ % 2 == 0),
        }
    }
}

/// Generate a trace by walking a small set of branches in program order.
fn generate_trace(num_branches: usize, seed: u64) -> Vec<(Instruction, Outcome)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut branches: Vec<SyntheticBranch> = (0..16).map(|idx| {
        let behavior = match rng.gen_range(0..3) { 
            0 => Behavior::Loop(rng.gen_range(2..9)),
            1 => Behavior::Biased(rng.gen_range(0.05..0.95)),
            _ => Behavior::Alternating,
        };
        SyntheticBranch { pc: 0x1000 + (idx as u64 * 0x14), behavior, occ: 0 }
    }).collect();

    let mut res = Vec::with_capacity(num_branches);
    while res.len() < num_branches { 
        for brn in branches.iter_mut() { 
            if res.len() == num_branches { break; }
            let outcome = brn.next_outcome(&mut rng);
            res.push((Instruction::from_pc(brn.pc, PC_BITS), outcome));
        }
    }
    res
}

fn run_test(trace: &[(Instruction, Outcome)], scheme: Scheme, verbose: bool) 
    -> Result<()> 
{
    let mut p = scheme.default_config().build()?;
    let mut hits = 0;
    for (inst, outcome) in trace { 
        let prediction = p.predict(inst)?;
        if prediction == *outcome { 
            hits += 1;
        }
        p.update(inst, *outcome)?;
    }

    let brns = trace.len();
    println!("[*] {:4} Global hit rate: {}/{} ({:.2}% correct) ({} misses)", 
        p.name(),
        hits,
        brns,
        hits as f64 / brns as f64 * 100.0,
        brns - hits,
    );
    if verbose { 
        print!("{}", p.monitor());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("usage: {} <scheme|all> [branches] [seed]", args[0]);
        return;
    }

    let schemes: Vec<Scheme> = if args[1] == "all" { 
        Scheme::ALL.to_vec()
    } else { 
        match args[1].parse() { 
            Ok(scheme) => vec![scheme],
            Err(e) => {
                println!("[!] {}", e);
                return;
            },
        }
    };
    let num_branches = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let seed = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);

    let trace = generate_trace(num_branches, seed);
    println!("[*] Generated {} branches (seed {})", trace.len(), seed);

    let verbose = schemes.len() == 1;
    for scheme in schemes { 
        if let Err(e) = run_test(&trace, scheme, verbose) { 
            println!("[!] {}: {}", scheme, e);
        }
    }
}
