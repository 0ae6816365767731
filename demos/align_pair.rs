use nw_aligner::{NeedlemanWunsch, ScoringModel, Sequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let scoring = ScoringModel::default()
        .with_gap_penalty(-1.0)
        .with_mismatch_penalty(-1.0);
    let mut aligner = NeedlemanWunsch::new(scoring);

    let seq_a = Sequence::new(b"ACGTACGT");
    let seq_b = Sequence::new(b"ACGTAGCT");

    let result = aligner.align_sequences(&seq_a, &seq_b)?;

    println!("Score: {}", result.score);
    for (i, pair) in result.alignments.iter().enumerate() {
        println!("Alignment {}:", i + 1);
        println!("{}", pair);
        println!();
    }

    Ok(())
}
