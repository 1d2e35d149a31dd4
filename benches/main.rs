use criterion::{black_box, criterion_group, criterion_main, Criterion};
use microcep::{
    AdaptiveAnalysis, AdaptiveGeneralizedCepstralAnalysis, AdaptiveMelCepstralAnalysis,
    AnalysisStream, GeneralizedCepstralConfig, MelCepstralConfig,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const BLOCK_SIZE: usize = 512;

fn noise_block() -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..BLOCK_SIZE).map(|_| rng.gen_range(-1.0..=1.0)).collect()
}

fn run_stream_benchmark<A: AdaptiveAnalysis>(id: &str, c: &mut Criterion, analysis: A) {
    let block = noise_block();
    let mut errors = vec![0.0; BLOCK_SIZE];
    let mut stream = AnalysisStream::new(analysis, 1).unwrap();
    c.bench_function(id, |b| {
        b.iter(|| {
            stream
                .process(black_box(&block[..]), &mut errors, |_, frame| {
                    black_box(frame);
                })
                .unwrap()
        })
    });
}

fn mel_cepstral_benchmarks(c: &mut Criterion) {
    for pade_order in [4, 5].iter() {
        let config = MelCepstralConfig::default().with_pade_order(*pade_order);
        let analysis = AdaptiveMelCepstralAnalysis::new(config).unwrap();
        let id = format!("Mel-cepstrum, order 25, Pade {}, {} samples", pade_order, BLOCK_SIZE);
        run_stream_benchmark(&id, c, analysis);
    }
}

fn generalized_cepstral_benchmarks(c: &mut Criterion) {
    for num_stage in [1, 4].iter() {
        let config = GeneralizedCepstralConfig::new(25, *num_stage);
        let analysis = AdaptiveGeneralizedCepstralAnalysis::new(config).unwrap();
        let id = format!(
            "Generalized cepstrum, order 25, {} stages, {} samples",
            num_stage, BLOCK_SIZE
        );
        run_stream_benchmark(&id, c, analysis);
    }
}

criterion_group!(benches, mel_cepstral_benchmarks, generalized_cepstral_benchmarks);
criterion_main!(benches);
