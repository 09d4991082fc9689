//! Benchmarks for the renderer, parser, and message/command plumbing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matcha::{Cmd, KeyMsg, KeyType, Message};

fn benchmark_message_creation(c: &mut Criterion) {
    c.bench_function("Message::new simple", |b| {
        b.iter(|| black_box(Message::new(42i32)));
    });

    c.bench_function("Message::new string", |b| {
        b.iter(|| black_box(Message::new(String::from("hello"))));
    });
}

fn benchmark_message_downcast(c: &mut Criterion) {
    let msg = Message::new(42i32);

    c.bench_function("Message::is check", |b| {
        b.iter(|| black_box(msg.is::<i32>()));
    });

    c.bench_function("Message::downcast_ref hit", |b| {
        b.iter(|| black_box(msg.downcast_ref::<i32>()));
    });

    c.bench_function("Message::downcast_ref miss", |b| {
        b.iter(|| black_box(msg.downcast_ref::<String>()));
    });
}

fn benchmark_keymsg_creation(c: &mut Criterion) {
    c.bench_function("KeyMsg::from_type", |b| {
        b.iter(|| black_box(KeyMsg::from_type(KeyType::Enter)));
    });

    c.bench_function("KeyMsg::from_char", |b| {
        b.iter(|| black_box(KeyMsg::from_char('a')));
    });
}

fn benchmark_cmd_creation(c: &mut Criterion) {
    c.bench_function("Cmd::new", |b| {
        b.iter(|| black_box(Cmd::new(|| Message::new(42))));
    });
}

fn benchmark_parser_feed(c: &mut Criterion) {
    use matcha::parser::Parser;

    c.bench_function("Parser::feed plain text line", |b| {
        b.iter(|| {
            let mut p = Parser::new();
            let mut out = Vec::new();
            p.feed(black_box(b"the quick brown fox jumps over the lazy dog"), &mut out);
            black_box(out);
        });
    });

    c.bench_function("Parser::feed cursor sequence", |b| {
        b.iter(|| {
            let mut p = Parser::new();
            let mut out = Vec::new();
            p.feed(black_box(b"\x1b[A\x1b[B\x1b[C\x1b[D"), &mut out);
            black_box(out);
        });
    });

    c.bench_function("Parser::feed sgr mouse report", |b| {
        b.iter(|| {
            let mut p = Parser::new();
            let mut out = Vec::new();
            p.feed(black_box(b"\x1b[<0;30;12M"), &mut out);
            black_box(out);
        });
    });
}

fn benchmark_renderer_flush(c: &mut Criterion) {
    use matcha::renderer::Renderer;

    c.bench_function("Renderer::flush full redraw", |b| {
        b.iter(|| {
            let mut r = Renderer::new(Vec::new(), 60);
            r.write(black_box("line one\nline two\nline three".to_string()));
            r.flush().unwrap();
        });
    });

    c.bench_function("Renderer::flush single-line diff", |b| {
        let mut r = Renderer::new(Vec::new(), 60);
        r.write("line one\nline two\nline three".to_string());
        r.flush().unwrap();
        b.iter(|| {
            r.write(black_box("line one\nCHANGED\nline three".to_string()));
            r.flush().unwrap();
        });
    });
}

criterion_group!(
    benches,
    benchmark_message_creation,
    benchmark_message_downcast,
    benchmark_keymsg_creation,
    benchmark_cmd_creation,
    benchmark_parser_feed,
    benchmark_renderer_flush,
);

criterion_main!(benches);
