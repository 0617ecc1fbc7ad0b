use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rgbmorph_morph::{MorphOp, Sel, filter_parallel, filter_sequential};
use rgbmorph_test::synth;

fn bench_morph(c: &mut Criterion) {
    let mut group = c.benchmark_group("Morph");
    let sel = Sel::square3x3();

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{width}x{height}");
        let src = synth::random(*width, *height, 3).unwrap();

        group.bench_with_input(
            BenchmarkId::new("sequential", &parameter_string),
            &src,
            |b, src| b.iter(|| black_box(filter_sequential(src, &sel, MorphOp::Erode).unwrap())),
        );

        for workers in [2, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{workers}"), &parameter_string),
                &src,
                |b, src| {
                    b.iter(|| {
                        black_box(filter_parallel(src, &sel, MorphOp::Erode, workers).unwrap())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_morph);
criterion_main!(benches);
