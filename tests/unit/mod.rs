mod care_model;
mod statistics;
