use gustavson::{
    reference_spgemm, spgemm_numeric, spgemm_numeric_opaque, spgemm_numeric_parallel, MinPlus,
    OpaqueMatrix, OpaqueWorkspace, PlusTimes, SemiringRegistry, SparseMatrixCSC, SparsePattern,
    SpgemmConfig, TypeCode, Workspace,
};

fn main() -> gustavson::Result<()> {
    println!("Gustavson numeric SpGEMM v{}", gustavson::VERSION);

    // A = [1 0; 0 2], B = [1 1; 0 1]
    let a = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1.0)], vec![(1, 2.0)]]);
    let b = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1.0)], vec![(0, 1.0), (1, 1.0)]]);

    println!("\nMatrix A:");
    println!("{:?}", a);

    println!("\nMatrix B:");
    println!("{:?}", b);

    // Pattern of C as a symbolic phase would hand it over
    let pattern = SparsePattern::from_columns(2, &[vec![0], vec![0, 1]]);
    let config = SpgemmConfig::default();
    println!("\nConfiguration:");
    println!("  Locator mode: {:?}", config.locator);
    println!("  Pattern checks: {}", config.check_patterns);
    println!("  Threads: {}", config.system_params.n_threads);

    // Typed plus-times
    let plus_times = PlusTimes::<f64>::new();
    let mut c = SparseMatrixCSC::with_pattern(pattern.clone(), 0.0);
    let mut w = Workspace::for_semiring(&plus_times, c.n_rows());
    let stats = spgemm_numeric(&mut c, &a, &b, &plus_times, &mut w, &config)?;
    println!("\nplus_times result:");
    println!("{:?}", c);
    println!("  {:?}", stats);

    // Same product through the opaque path
    let registry = SemiringRegistry::with_builtins();
    let opaque = registry.get_uniform("plus_times", TypeCode::F64)?;
    let mut oc = OpaqueMatrix::with_pattern(pattern.clone(), opaque.identity());
    let mut ow = OpaqueWorkspace::new(&opaque, oc.pattern.n_rows);
    spgemm_numeric_opaque(
        &mut oc,
        &OpaqueMatrix::from_typed(&a),
        &OpaqueMatrix::from_typed(&b),
        &opaque,
        &mut ow,
        &config,
    )?;
    println!("\nopaque {} result: {:?}", opaque.name(), oc.to_typed::<f64>());

    // Shortest two-hop paths, in parallel
    let min_plus = MinPlus::<f64>::new();
    let mut paths = reference_spgemm(&a, &b, &min_plus);
    let expected = paths.values.clone();
    spgemm_numeric_parallel(&mut paths, &a, &b, &min_plus, &config)?;
    println!("\nmin_plus result: {:?}", paths.values);
    println!("matches reference: {}", paths.values == expected);

    Ok(())
}
