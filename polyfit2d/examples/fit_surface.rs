use polyfit2d::{
    create_evaluation_grid, generate_random_points, predictions_to_csv,
    progress::{closure_sink, ProgressMsg},
    PolynomialRegression2D, SurfaceTestFunctions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Random source points in [0, 1]^2
    let num_points = 500usize;
    let points = generate_random_points(num_points, Some(42));

    // Define some values at the source points using Franke's function
    let observations = SurfaceTestFunctions::sample(&points, SurfaceTestFunctions::franke_2d)?;

    // Print training progress as it arrives
    let (sink, listener) = closure_sink(64, |msg: ProgressMsg| match msg {
        ProgressMsg::Message { message } => println!("{}", message),
        other => println!("{:?}", other),
    });

    // Fit a quintic surface
    let model = PolynomialRegression2D::builder(observations)
        .order(5)
        .progress_callback(sink)
        .build()?;

    println!("{}", model.to_formula(Some(4)));
    if let Some(score) = model.score() {
        println!(
            "r = {:.4}, r2 = {:.4}, chi2 = {:.4}, rmsd = {:.4}",
            score.r, score.r2, score.chi2, score.rmsd
        );
    }

    // Build a 2D grid of target points in [0, 1]^2 to evaluate the surface at
    let n = 50;
    let target_points = create_evaluation_grid(&[(0.0, 1.0), (0.0, 1.0)], &[n, n]);
    let predicted = model.evaluate(&target_points)?;
    let values: Vec<f64> = predicted.col(0).iter().copied().collect();

    let out_dir = std::env::temp_dir();
    predictions_to_csv(
        &target_points,
        &values,
        &out_dir.join("franke_quintic.csv").to_string_lossy(),
    )?;
    model.save_model(out_dir.join("franke_quintic.json"))?;

    // Dropping the model closes the progress channel
    drop(model);
    let _ = listener.join();

    Ok(())
}
