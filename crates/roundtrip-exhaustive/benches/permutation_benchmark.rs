// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use roundtrip_exhaustive::eval::{EdgeSumEvaluator, TourEvaluator};
use roundtrip_exhaustive::permutation::PlainChanges;
use roundtrip_exhaustive::solver::ExhaustiveSolver;
use roundtrip_model::index::CityIndex;
use roundtrip_model::matrix::checked_factorial;
use roundtrip_model::synth::random_matrix;
use roundtrip_search::monitor::no_op::NoOpMonitor;
use std::hint::black_box;

fn sequence(len: usize) -> Vec<CityIndex> {
    (1..=len).map(CityIndex::new).collect()
}

fn bench_full_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain_changes_enumeration");
    for len in [8usize, 9, 10] {
        group.throughput(Throughput::Elements(checked_factorial(len).unwrap()));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| {
                let mut generator = PlainChanges::new(sequence(len)).expect("distinct indices");
                let mut pulled: u64 = 0;
                while generator.has_more() {
                    let perm = generator.next_permutation().expect("gated on has_more");
                    pulled += black_box(perm.len()) as u64;
                }
                pulled
            })
        });
    }
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_solve");
    for num_cities in [9usize, 10] {
        let matrix = random_matrix::<i64>(num_cities, 42, 1, 100).expect("valid instance");
        group.throughput(Throughput::Elements(matrix.num_tours().unwrap()));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_cities),
            &matrix,
            |b, matrix| {
                let mut solver = ExhaustiveSolver::preallocated(num_cities);
                let evaluator = EdgeSumEvaluator::new();
                b.iter(|| {
                    let outcome = solver
                        .solve(matrix, CityIndex::new(0), &evaluator, NoOpMonitor::new())
                        .expect("valid instance");
                    black_box(outcome.best_tour().map(|tour| tour.cost()))
                })
            },
        );
    }
    group.finish();
}

fn bench_single_evaluation(c: &mut Criterion) {
    let matrix = random_matrix::<i64>(12, 7, 1, 100).expect("valid instance");
    let evaluator = EdgeSumEvaluator::new();
    let mut cycle: Vec<CityIndex> = (0..12).map(CityIndex::new).collect();
    cycle.push(CityIndex::new(0));

    c.bench_function("edge_sum_evaluation_n12", |b| {
        b.iter(|| black_box(evaluator.evaluate_cycle(&matrix, black_box(&cycle))))
    });
}

criterion_group!(
    benches,
    bench_full_enumeration,
    bench_solver,
    bench_single_evaluation
);
criterion_main!(benches);
