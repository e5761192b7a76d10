mod identify_flow;
mod persistence;
