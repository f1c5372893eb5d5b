
print("Merge the bottom-right corner of source.png onto reference.png.\n");

if !load_first("reference.png") {
    print("Could not load reference.png\n");
} else if !load_second("source.png") {
    print("Could not load source.png\n");
} else if save("merged") {
    print("Wrote merged.png\n");
}

kill();
