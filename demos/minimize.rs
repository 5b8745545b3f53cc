use qmkit::*;

fn main() -> Result<(), QmkitError> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .unwrap_or_else(|e| eprintln!("no logger: {}", e));

    // f(A,B,C,D) = m(4,8,10,11,12,15) + d(9,14)
    let table = TruthTable::new(VarSpace::alphabetic(4)?, [4, 8, 10, 11, 12, 15], [9, 14])?;
    let result = minimize(&table)?;

    println!("{}", result.grid());
    println!("Prime implicants:");
    print!("{}", result.prime_implicants());
    println!("Essential prime implicants:");
    for imp in result.essential_prime_implicants() {
        println!("  {}", imp);
    }
    println!("SOP: {}", result.sop());
    println!("POS: {}", result.pos());

    let logic = Minimizer::with_format(&efmt::LOGIC_FMT_CFG).minimize(&table)?;
    println!("SOP: {}", logic.sop());
    println!("POS: {}", logic.pos());

    // Read back the rendered form
    let expr = table.space().parse_expression(result.sop())?;
    println!("{}", expr.formatted(table.space(), &efmt::LOWERCASE_FMT_CFG));
    Ok(())
}
