use ccomp::build::{Invocation, build_compile_command, output_path};
use ccomp::config::{IMPLEMENTATION_EXTENSION, Patterns};
use ccomp::deps::{CompanionIndex, SourceResolver, scan};
use criterion::{Criterion, criterion_group, criterion_main};
use std::fs;
use std::hint::black_box;
use std::path::Path;

const MODULES: usize = 200;

// Lay out a project with many modules split across include/ and src/
fn create_project(root: &Path) {
    let include = root.join("include");
    let src = root.join("src");
    fs::create_dir_all(&include).unwrap();
    fs::create_dir_all(&src).unwrap();

    let mut main = String::from("#include <iostream>\n");
    for i in 0..MODULES {
        fs::write(include.join(format!("mod{}.hpp", i)), "#pragma once\n").unwrap();
        // Every other module is header-only
        if i % 2 == 0 {
            fs::write(src.join(format!("mod{}.cpp", i)), "// impl\n").unwrap();
        }
        main.push_str(&format!("#include \"mod{}.hpp\"\n", i));
    }
    main.push_str("int main() { return 0; }\n");
    fs::write(root.join("main.cpp"), main).unwrap();
}

fn bench_index_build(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    create_project(temp_dir.path());

    c.bench_function("companion_index_build", |b| {
        b.iter(|| CompanionIndex::build(black_box(temp_dir.path()), IMPLEMENTATION_EXTENSION))
    });
}

fn bench_scan_includes(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    create_project(temp_dir.path());
    let patterns = Patterns::new();
    let entry = temp_dir.path().join("main.cpp");

    c.bench_function("scan_includes", |b| {
        b.iter(|| {
            scan(black_box(&entry), &patterns.include)
                .unwrap()
                .filter_map(Result::ok)
                .count()
        })
    });
}

fn bench_resolve_and_build_command(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    create_project(temp_dir.path());
    let patterns = Patterns::new();
    let entry = temp_dir.path().join("main.cpp");
    let compiler = Invocation::new("g++").arg("-std=c++20");

    c.bench_function("resolve_and_build_command", |b| {
        b.iter(|| {
            let companions = SourceResolver::new(&patterns, IMPLEMENTATION_EXTENSION)
                .resolve(black_box(&entry))
                .unwrap();
            let output = output_path(Path::new("./out"), &entry);
            build_compile_command(&compiler, &entry, &output, &[], &companions)
        })
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_scan_includes,
    bench_resolve_and_build_command
);
criterion_main!(benches);
