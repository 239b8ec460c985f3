use rlc_impedance::prelude::*;

fn main() {
    let expr = "series(R:100, parallel(C:1e-6, L:0.01), R:50)";
    let tree = match parse(expr) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("parse failed: {err}");
            return;
        }
    };
    println!("circuit: {}", tree.description());

    let model = ImpedanceModel::new();
    println!("freq(Hz), Z, |Z|(ohm)");
    for f in [50.0_f64, 1.0e3, 1.0e4, 1.0e5] {
        match model.calculate_impedance(&tree, f) {
            Ok(z) => println!("{f:.1}, {z}, {:.6e}", z.magnitude()),
            Err(err) => println!("{f:.1}, evaluation failed: {err}"),
        }
    }
    println!("history entries: {}", model.history_size());
}
