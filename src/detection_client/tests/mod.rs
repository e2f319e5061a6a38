mod wire_test;
