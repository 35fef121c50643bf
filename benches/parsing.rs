use argbind::{
    parse, ConversionType, EnumType, OptionSpec, Parser, ParserSettings, Specification, ValueSpec,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn specs() -> Vec<Specification> {
    vec![
        OptionSpec::scalar('s', "stringvalue", ConversionType::String).into(),
        OptionSpec::sequence('i', "int-seq", ConversionType::int()).into(),
        OptionSpec::switch('x', "").into(),
        OptionSpec::counter('v', "verbose").into(),
        OptionSpec::scalar(
            'c',
            "colors",
            ConversionType::Enum(EnumType::from_names("Colors", &["Red", "Green", "Blue"])),
        )
        .into(),
        OptionSpec::scalar(None, "duration", ConversionType::Duration).into(),
        ValueSpec::sequence(0, ConversionType::String).into(),
    ]
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let specs = specs();
    let args = ["-x", "--stringvalue", "hello"];

    c.bench_function("parse_simple", |b| {
        b.iter(|| parse(black_box(&args), black_box(&specs)))
    });
}

fn benchmark_parse_mixed(c: &mut Criterion) {
    let specs = specs();
    let args = [
        "-vvv",
        "--stringvalue=hello",
        "-i",
        "1",
        "20",
        "300",
        "--colors",
        "Green",
        "--duration",
        "01:30:00",
        "--",
        "-a",
        "--b",
    ];

    c.bench_function("parse_mixed", |b| {
        b.iter(|| parse(black_box(&args), black_box(&specs)))
    });
}

fn benchmark_parse_errors(c: &mut Criterion) {
    let specs = specs();
    let args = ["--nope", "-z", "-i", "one", "--colors", "Yellow", "--stringvalue"];

    c.bench_function("parse_with_errors", |b| {
        b.iter(|| parse(black_box(&args), black_box(&specs)))
    });
}

fn benchmark_sequence_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("int_sequence");
    let specs = specs();

    for size in [10, 100, 1000].iter() {
        let mut args = vec!["--int-seq".to_string()];
        args.extend((0..*size).map(|n| n.to_string()));

        group.bench_with_input(BenchmarkId::from_parameter(size), &args, |b, args| {
            b.iter(|| parse(black_box(args), black_box(&specs)))
        });
    }

    group.finish();
}

fn benchmark_multi_instance(c: &mut Criterion) {
    let specs = specs();
    let parser = Parser::new(ParserSettings::new().with_multi_instance(true));
    let args: Vec<String> = (0..50)
        .flat_map(|n| vec!["-i".to_string(), n.to_string()])
        .collect();

    c.bench_function("parse_multi_instance", |b| {
        b.iter(|| parser.parse(black_box(&args), black_box(&specs)))
    });
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_parse_mixed,
    benchmark_parse_errors,
    benchmark_sequence_sizes,
    benchmark_multi_instance
);
criterion_main!(benches);
